//! # Core Error Types
//!
//! Domain errors for business logic operations. These are pure logic
//! errors only; persistence failures live in `billcraft-db`.

use thiserror::Error;

/// Errors that can occur in core business logic.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// Operation requires an estimate but got a bill.
    ///
    /// ## When This Occurs
    /// - Converting a document that is already a bill
    #[error("Document {0} is not an estimate")]
    NotAnEstimate(String),

    /// Document lookup by id found nothing.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Product lookup by id found nothing on the document.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Line item lookup by id found nothing on the product.
    #[error("Line item not found: {0}")]
    LineItemNotFound(String),
}

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_offender() {
        let err = CoreError::NotAnEstimate("doc-9".to_string());
        assert_eq!(err.to_string(), "Document doc-9 is not an estimate");

        let err = CoreError::ProductNotFound("p-1".to_string());
        assert_eq!(err.to_string(), "Product not found: p-1");
    }
}
