//! # Commands Module
//!
//! Async command handlers a UI shell invokes. Each handler declares
//! exactly the state it needs and returns `Result<T, ApiError>` so
//! failures serialize cleanly across the shell boundary.
//!
//! ```text
//! Shell action              Handler                     Effect
//! ────────────              ───────                     ──────
//! open list ──────────────► list_documents()            read
//! open document ──────────► get_document()              read
//! save ───────────────────► save_document()             state + store
//! delete (confirmed) ─────► delete_document()           state + store
//! convert to bill ────────► convert_estimate()          state + store
//! print preview ──────────► render_document()           read
//! settings screen ────────► get_settings/save_settings  state + store
//! AI assist ──────────────► suggest_line_item_*         draft only
//! ```

pub mod ai;
pub mod document;
pub mod render;
pub mod settings;

pub use ai::{suggest_line_item_name, suggest_line_item_price};
pub use document::{
    begin_draft, convert_estimate, delete_document, get_document, list_documents, save_document,
};
pub use render::render_document;
pub use settings::{get_settings, save_settings};
