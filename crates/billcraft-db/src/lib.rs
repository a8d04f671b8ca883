//! # billcraft-db: Persistence Layer
//!
//! SQLite-backed persistence for Billcraft, using sqlx for async
//! operations. Collections are stored as JSON values in a
//! string-keyed table (see [`store`] for the rationale).
//!
//! ## Architecture Position
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  billcraft-app command (e.g. save_document)                │
//! │       │                                                    │
//! │       ▼                                                    │
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │              billcraft-db (THIS CRATE)               │  │
//! │  │                                                      │  │
//! │  │   Database ──── pool + migrations (pool.rs)          │  │
//! │  │   KvStore ───── string-keyed JSON store (store.rs)   │  │
//! │  │   Migrations ── embedded SQL (migrations.rs)         │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! │       │                                                    │
//! │       ▼                                                    │
//! │  SQLite file, e.g. ~/.local/share/billcraft/billcraft.db   │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use billcraft_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("billcraft.db")).await?;
//! let documents = db.store().load_documents().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::{KvStore, DOCUMENTS_KEY, SETTINGS_KEY};
