//! Store error model.

use thiserror::Error;

/// Failure of a single store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record matched the given key/filter.
    #[error("not found")]
    NotFound,

    /// A stored or supplied value was not representable (e.g. unknown status).
    #[error("invalid value: {0}")]
    Invalid(String),

    /// The underlying database failed or is unavailable.
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound,
            other => Self::Backend(other.to_string()),
        }
    }
}
