//! Domain service layer.
//!
//! Every function here is synchronous with respect to the store: it runs
//! against a caller-supplied connection (usually a transaction owned by the
//! HTTP handler), performs no retries, and reports integrity and not-found
//! conditions as distinguishable outcomes for the boundary to map.

pub mod lifts;
pub mod sets;
pub mod splits;
pub mod users;
pub mod workouts;

use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Entity absent, or owner-scoped and not owned by the caller. The two
    /// cases are intentionally indistinguishable.
    #[error("{0}")]
    NotFound(String),
    /// Uniqueness violation: duplicate slug/email or derived-key collision.
    #[error("{0}")]
    Conflict(String),
    /// Foreign-key violation: the caller constructed an invalid reference.
    #[error("integrity violation: {0}")]
    IntegrityViolation(String),
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = err {
            match db.kind() {
                ErrorKind::UniqueViolation => return ServiceError::Conflict(db.message().to_string()),
                ErrorKind::ForeignKeyViolation => {
                    return ServiceError::IntegrityViolation(db.message().to_string())
                }
                _ => {}
            }
        }
        ServiceError::Database(err)
    }
}

/// Classify a store error, substituting a caller-facing message for the raw
/// database text when the failure is a uniqueness conflict.
pub(crate) fn conflict_message(err: sqlx::Error, message: impl Into<String>) -> ServiceError {
    match ServiceError::from(err) {
        ServiceError::Conflict(_) => ServiceError::Conflict(message.into()),
        other => other,
    }
}
