//! Shared error types for the services crate.

use thiserror::Error;

use medq_core::model::OptionsError;
use storage::repository::StorageError;

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for the requested categories")]
    EmptyPool,

    #[error("session already on its last question")]
    Completed,

    #[error(transparent)]
    Options(#[from] OptionsError),
}

/// Errors emitted by `StatsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatsError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}
