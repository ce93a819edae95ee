//! Shared error types for the services crate.

use thiserror::Error;

use drill_core::model::{CatalogError, ModeError, QuizMode, SessionSummaryError};
use storage::repository::StorageError;

/// Errors emitted by quiz sessions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    InvalidPack(#[from] CatalogError),
    #[error(transparent)]
    InvalidMode(#[from] ModeError),
    #[error("session already completed")]
    Completed,
    #[error("{action} is not available in {mode} mode")]
    ActionUnavailable {
        mode: QuizMode,
        action: &'static str,
    },
    #[error("this round has already been answered")]
    AlreadyAnswered,
    #[error("option {index} does not exist (round has {len} options)")]
    OptionOutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
}

/// Errors emitted by `PreferencesService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PreferencesServiceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
