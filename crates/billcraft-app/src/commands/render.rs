//! # Render Commands
//!
//! Command handler bridging the collection to the printable
//! projection. The projection itself is pure core logic; this layer
//! only resolves the document and snapshots the settings.

use billcraft_core::render::{project, RenderedDocument};

use crate::error::ApiError;
use crate::state::{DocumentsState, SettingsState};

/// Projects a saved document into its printable tree.
pub async fn render_document(
    documents: &DocumentsState,
    settings: &SettingsState,
    id: &str,
) -> Result<RenderedDocument, ApiError> {
    let document = documents
        .find(id)
        .ok_or_else(|| ApiError::not_found("Document", id))?;
    let profile = settings.get();
    Ok(project(&document, &profile))
}
