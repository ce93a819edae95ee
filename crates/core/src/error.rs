use thiserror::Error;

use crate::model::{CatalogError, EntryError, ModeError, PackError, SessionSummaryError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Entry(#[from] EntryError),
    #[error(transparent)]
    Pack(#[from] PackError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Mode(#[from] ModeError),
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
}
