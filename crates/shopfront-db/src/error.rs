//! # Database Error Types
//!
//! Error types for Product Store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← classified by the operation that failed       │
//! │       │                                                                 │
//! │       ├── kind(): Connection | Read | Write | NotFound                 │
//! │       ▼                                                                 │
//! │  ErrorReport { code, message } ← serialized for the UI layer           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A raw `sqlx::Error` says nothing about whether it came from opening the
//! database, a read or a write, so there is no blanket `From<sqlx::Error>`.
//! Call sites pick the class with [`DbError::connection`], [`DbError::read`]
//! or [`DbError::write`].

use serde::Serialize;
use shopfront_core::CoreError;
use thiserror::Error;

/// Product Store errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// The database could not be opened.
    ///
    /// ## When This Occurs
    /// - Directory doesn't exist or isn't writable
    /// - File is not a SQLite database
    /// - Disk full
    #[error("Connection failed: {source}")]
    ConnectionFailed {
        #[source]
        source: sqlx::Error,
    },

    /// The file was written by a newer schema version than this build knows.
    #[error("Database schema version {found} is newer than supported version {supported}")]
    VersionTooNew { found: i64, supported: i64 },

    /// The schema upgrade transaction failed.
    #[error("Schema upgrade failed: {source}")]
    UpgradeFailed {
        #[source]
        source: sqlx::Error,
    },

    /// The store was closed with [`crate::Database::close`].
    #[error("Database is closed")]
    Closed,

    /// A read transaction failed.
    #[error("Read failed: {source}")]
    ReadFailed {
        #[source]
        source: sqlx::Error,
    },

    /// A write transaction failed.
    #[error("Write failed: {source}")]
    WriteFailed {
        #[source]
        source: sqlx::Error,
    },

    /// A write violated a table constraint (primary key collision, CHECK).
    #[error("Constraint violation: {message}")]
    ConstraintViolation {
        message: String,
        #[source]
        source: sqlx::Error,
    },

    /// The record handed to a write cannot be stored.
    ///
    /// ## When This Occurs
    /// - Empty `id` passed to update
    /// - Price that does not coerce to a finite number
    #[error("Invalid {field}: {reason}")]
    InvalidRecord { field: String, reason: String },

    /// More than one record carries the slug a delete was asked to resolve.
    #[error("Slug '{slug}' matches {count} products")]
    AmbiguousSlug { slug: String, count: usize },

    /// No record matches the lookup key.
    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },
}

/// Coarse error classes callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Opening or upgrading the database failed.
    Connection,
    /// A read-only transaction failed.
    Read,
    /// A read-write transaction failed or the record was rejected.
    Write,
    /// A logical lookup found nothing. Not a storage failure.
    NotFound,
}

impl DbError {
    /// Classifies an error raised while opening the database.
    pub fn connection(err: sqlx::Error) -> Self {
        DbError::ConnectionFailed { source: err }
    }

    /// Classifies an error raised inside a read-only transaction.
    pub fn read(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolClosed => DbError::Closed,
            err => DbError::ReadFailed { source: err },
        }
    }

    /// Classifies an error raised inside a read-write transaction.
    ///
    /// ## Error Mapping
    /// ```text
    /// "UNIQUE constraint failed: products.id" → ConstraintViolation
    /// "CHECK constraint failed: ..."          → ConstraintViolation
    /// PoolClosed                               → Closed
    /// anything else                            → WriteFailed
    /// ```
    pub fn write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let message = db_err.message().to_string();
            if message.contains("constraint failed") {
                return DbError::ConstraintViolation {
                    message,
                    source: err,
                };
            }
        }

        match err {
            sqlx::Error::PoolClosed => DbError::Closed,
            err => DbError::WriteFailed { source: err },
        }
    }

    /// Creates a NotFound error for a given entity type and key.
    pub fn not_found(entity: impl Into<String>, key: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            key: key.into(),
        }
    }

    /// Creates an InvalidRecord error.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DbError::InvalidRecord {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error class.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DbError::ConnectionFailed { .. }
            | DbError::VersionTooNew { .. }
            | DbError::UpgradeFailed { .. }
            | DbError::Closed => ErrorKind::Connection,
            DbError::ReadFailed { .. } => ErrorKind::Read,
            DbError::WriteFailed { .. }
            | DbError::ConstraintViolation { .. }
            | DbError::InvalidRecord { .. }
            | DbError::AmbiguousSlug { .. } => ErrorKind::Write,
            DbError::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// Returns `true` for [`ErrorKind::NotFound`].
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Record-building failures surface as write errors.
impl From<CoreError> for DbError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidPrice { input } => {
                DbError::invalid("price", format!("'{}' is not a finite number", input))
            }
            CoreError::Validation(e) => DbError::invalid(e.field().to_string(), e.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Error Report
// =============================================================================

/// What the UI layer receives when a store operation fails.
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: sony-wh-1000xm5"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    /// Machine-readable error class.
    pub code: ErrorKind,

    /// Human-readable error message for display.
    pub message: String,
}

impl From<&DbError> for ErrorReport {
    fn from(err: &DbError) -> Self {
        let message = match err {
            DbError::ReadFailed { source } | DbError::WriteFailed { source } => {
                // Log the native error but return a generic message
                tracing::error!(error = %source, "Product store operation failed");
                match err.kind() {
                    ErrorKind::Read => "Could not load products".to_string(),
                    _ => "Could not save changes".to_string(),
                }
            }
            DbError::ConnectionFailed { source } | DbError::UpgradeFailed { source } => {
                tracing::error!(error = %source, "Product store unavailable");
                "Product database is unavailable".to_string()
            }
            other => other.to_string(),
        };

        ErrorReport {
            code: err.kind(),
            message,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::ValidationError;

    #[test]
    fn test_kinds() {
        assert_eq!(DbError::Closed.kind(), ErrorKind::Connection);
        assert_eq!(
            DbError::VersionTooNew {
                found: 2,
                supported: 1
            }
            .kind(),
            ErrorKind::Connection
        );
        assert_eq!(DbError::read(sqlx::Error::RowNotFound).kind(), ErrorKind::Read);
        assert_eq!(DbError::write(sqlx::Error::RowNotFound).kind(), ErrorKind::Write);
        assert_eq!(DbError::invalid("id", "empty").kind(), ErrorKind::Write);
        assert!(DbError::not_found("Product", "s1").is_not_found());
    }

    #[test]
    fn test_pool_closed_maps_to_closed() {
        assert!(matches!(DbError::read(sqlx::Error::PoolClosed), DbError::Closed));
        assert!(matches!(DbError::write(sqlx::Error::PoolClosed), DbError::Closed));
    }

    #[test]
    fn test_core_error_conversion() {
        let err: DbError = CoreError::InvalidPrice {
            input: "abc".to_string(),
        }
        .into();
        assert!(matches!(err, DbError::InvalidRecord { ref field, .. } if field == "price"));

        let err: DbError = CoreError::Validation(ValidationError::Required {
            field: "name".to_string(),
        })
        .into();
        assert_eq!(err.kind(), ErrorKind::Write);
    }

    #[test]
    fn test_error_report_serialization() {
        let err = DbError::not_found("Product", "nonexistent");
        let report = ErrorReport::from(&err);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: nonexistent");

        let report = ErrorReport::from(&DbError::read(sqlx::Error::RowNotFound));
        assert_eq!(report.message, "Could not load products");
    }
}
