//! Error types for the store backends.

use thiserror::Error;

/// Store result type.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by store backends.
///
/// `UniqueViolation` is the authoritative duplicate rejection: service-level
/// existence checks are a fast-path for a friendly message, but a race
/// between two concurrent writes is settled by the database constraint and
/// arrives here. The caller composes the user-facing message since it knows
/// which natural key was involved.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated")]
    UniqueViolation,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Map an sqlx error, folding unique-constraint violations into
    /// [`StoreError::UniqueViolation`].
    pub(crate) fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e
            && db_err.is_unique_violation()
        {
            return StoreError::UniqueViolation;
        }
        StoreError::Database(e)
    }
}
