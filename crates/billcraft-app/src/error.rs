//! # API Error Type
//!
//! Unified error type for command handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Command Function: Result<T, ApiError>                       │
//! │        │                                                     │
//! │        ├── DbError ───────► ApiError (DATABASE_ERROR, ...)   │
//! │        ├── CoreError ─────► ApiError (NOT_FOUND, ...)        │
//! │        └── Success ───────► T                                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! Errors cross the shell boundary as JSON with a machine-readable
//! `code` and a human-readable `message`.

use serde::Serialize;

use billcraft_core::CoreError;
use billcraft_db::DbError;

/// API error returned from command handlers.
///
/// What the shell receives when a command fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Document not found: abc-123"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Business rule violated (e.g. converting a bill)
    BusinessLogic,

    /// Destructive operation attempted without confirmation
    ConfirmationRequired,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a confirmation-required error.
    pub fn confirmation_required(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ConfirmationRequired, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts persistence errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::KeyNotFound(key) => ApiError::not_found("Key", &key),
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::CorruptValue { key, message } => {
                tracing::error!("Corrupt value under '{}': {}", key, message);
                ApiError::new(ErrorCode::DatabaseError, "Stored data is corrupt")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DocumentNotFound(id) => ApiError::not_found("Document", &id),
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::LineItemNotFound(id) => ApiError::not_found("Line item", &id),
            CoreError::NotAnEstimate(id) => ApiError::new(
                ErrorCode::BusinessLogic,
                format!("Document {} is already a bill", id),
            ),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_screaming_codes() {
        let err = ApiError::not_found("Document", "abc-123");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(
            json,
            r#"{"code":"NOT_FOUND","message":"Document not found: abc-123"}"#
        );
    }

    #[test]
    fn core_errors_map_to_codes() {
        let err: ApiError = CoreError::DocumentNotFound("d1".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: ApiError = CoreError::NotAnEstimate("d2".to_string()).into();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }
}
