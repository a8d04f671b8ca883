//! # billcraft-app: Application Layer
//!
//! Thin orchestration layer a UI shell embeds: managed state, async
//! command handlers, suggestion and export seams.
//!
//! ## Bootstrap
//! ```rust,ignore
//! use billcraft_app::{init_tracing, App};
//! use billcraft_db::DbConfig;
//!
//! init_tracing();
//! let config = DbConfig::new(billcraft_app::default_database_path()?);
//! let app = App::init(config).await?;
//!
//! let documents = billcraft_app::commands::list_documents(&app.documents).await?;
//! ```

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use billcraft_db::{Database, DbConfig};

// =============================================================================
// Module Declarations
// =============================================================================

pub mod commands;
pub mod error;
pub mod export;
pub mod state;
pub mod suggest;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ApiError, ErrorCode};
pub use state::{parse_amount, DocumentsState, DraftEditor, SettingsState};
pub use suggest::{FallbackSuggester, SuggestionProvider};

// =============================================================================
// Bootstrap
// =============================================================================

/// Initializes the tracing subscriber.
///
/// Filter defaults to `info` and can be overridden with `RUST_LOG`,
/// e.g. `RUST_LOG=billcraft_db=debug`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Resolves the per-platform database path, creating the data
/// directory if needed.
///
/// e.g. `~/.local/share/billcraft/billcraft.db` on Linux.
pub fn default_database_path() -> Result<PathBuf, ApiError> {
    let dirs = ProjectDirs::from("com", "billcraft", "billcraft")
        .ok_or_else(|| ApiError::internal("No home directory available"))?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .map_err(|e| ApiError::internal(format!("Cannot create data directory: {e}")))?;
    Ok(data_dir.join("billcraft.db"))
}

/// The assembled application: database handle plus managed state,
/// seeded from the store.
#[derive(Debug, Clone)]
pub struct App {
    pub db: Database,
    pub documents: DocumentsState,
    pub settings: SettingsState,
}

impl App {
    /// Opens the database, runs migrations, and loads the persisted
    /// collections into managed state.
    pub async fn init(config: DbConfig) -> Result<Self, ApiError> {
        let db = Database::new(config).await?;

        let store = db.store();
        let documents = store.load_documents().await?;
        let settings = store.load_settings().await?;

        info!(documents = documents.len(), "Application state loaded");

        Ok(App {
            db,
            documents: DocumentsState::from_documents(documents),
            settings: SettingsState::from_profile(settings),
        })
    }
}
