//! # Export Collaborators
//!
//! Seams for turning a rendered document into shareable artifacts.
//! The actual raster/PDF work happens in the shell (which owns a
//! layout engine); this module defines the contracts and the A4 page
//! math both sides agree on.
//!
//! ```text
//! RenderedDocument ──► Rasterizer ──► PNG bytes ──► ShareSheet
//!                  ──► PdfExporter ─► A4 pages  ──► file / share
//!                  ──► MarkupExporter ─► HTML for print preview
//! ```

use thiserror::Error;

use billcraft_core::render::RenderedDocument;

/// A4 page width in pixels at 96 DPI.
pub const A4_WIDTH_PX: u32 = 794;

/// A4 page height in pixels at 96 DPI.
pub const A4_HEIGHT_PX: u32 = 1123;

/// Number of A4 pages needed for content of the given height.
///
/// Empty content still occupies one page.
pub fn page_count(content_height_px: u32) -> u32 {
    if content_height_px == 0 {
        return 1;
    }
    content_height_px.div_ceil(A4_HEIGHT_PX)
}

/// Errors from export collaborators.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The layout engine failed to produce output.
    #[error("Render failed: {0}")]
    RenderFailed(String),

    /// Writing the artifact to disk failed.
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// The platform share facility was unavailable or declined.
    #[error("Share failed: {0}")]
    ShareFailed(String),
}

/// Renders a document to a raster image (PNG bytes).
pub trait DocumentRasterizer: Send + Sync {
    fn rasterize(&self, rendered: &RenderedDocument) -> Result<Vec<u8>, ExportError>;
}

/// Renders a document to a paginated A4 PDF.
pub trait PdfExporter: Send + Sync {
    fn export_pdf(&self, rendered: &RenderedDocument) -> Result<Vec<u8>, ExportError>;
}

/// Renders a document to standalone markup for a print preview.
pub trait MarkupExporter: Send + Sync {
    fn export_markup(&self, rendered: &RenderedDocument) -> Result<String, ExportError>;
}

/// Hands an artifact to the platform share facility.
pub trait ShareSheet: Send + Sync {
    fn share(&self, file_name: &str, mime_type: &str, bytes: &[u8]) -> Result<(), ExportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0), 1);
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(A4_HEIGHT_PX), 1);
        assert_eq!(page_count(A4_HEIGHT_PX + 1), 2);
        assert_eq!(page_count(3 * A4_HEIGHT_PX), 3);
    }
}
