//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Errors emitted by `StudySession`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
