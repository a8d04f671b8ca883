//! # State Module
//!
//! Managed application state for the command layer.
//!
//! ## Why Multiple State Types?
//! Instead of a single `AppState` struct containing everything, each
//! concern gets its own state type:
//!
//! 1. **Better Separation of Concerns**: each type has one job
//! 2. **Clearer Command Signatures**: commands declare exactly what they need
//! 3. **Reduced Contention**: independent states don't block each other
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    State Architecture                        │
//! │                                                              │
//! │  ┌────────────────┐ ┌───────────────┐ ┌──────────────────┐   │
//! │  │ DocumentsState │ │ SettingsState │ │   DraftEditor    │   │
//! │  │                │ │               │ │                  │   │
//! │  │ Arc<Mutex<     │ │ Arc<Mutex<    │ │ owned by the     │   │
//! │  │  Vec<Document>>│ │  Settings>>   │ │ editing screen   │   │
//! │  └────────────────┘ └───────────────┘ └──────────────────┘   │
//! │                                                              │
//! │  THREAD SAFETY:                                              │
//! │  • DocumentsState / SettingsState: Arc<Mutex<T>>             │
//! │  • DraftEditor: single-owner, no locking needed              │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod documents;
mod draft;
mod settings;

pub use documents::DocumentsState;
pub use draft::{parse_amount, DraftEditor};
pub use settings::SettingsState;
