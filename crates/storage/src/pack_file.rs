use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use drill_core::model::PackCatalog;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repository::{PackRecord, PackRepository, StorageError, catalog_from_records};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PackFileError {
    #[error("failed to read pack file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("pack file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("pack file contains invalid data: {0}")]
    Invalid(#[from] drill_core::Error),
}

/// On-disk layout: `{"packs": [{"name": ..., "entries": [...]}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackFile {
    pub packs: Vec<PackRecord>,
}

impl PackFile {
    /// # Errors
    ///
    /// Returns `PackFileError::Json` if `json` does not match the layout.
    pub fn parse(json: &str) -> Result<Self, PackFileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Returns `PackFileError::Io` if the file cannot be read, or
    /// `PackFileError::Json` if it cannot be parsed.
    pub fn read(path: &Path) -> Result<Self, PackFileError> {
        let json = std::fs::read_to_string(path).map_err(|source| PackFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&json)
    }

    /// # Errors
    ///
    /// Returns `PackFileError::Invalid` if any pack or entry fails validation.
    pub fn into_catalog(self) -> Result<PackCatalog, PackFileError> {
        Ok(catalog_from_records(self.packs)?)
    }
}

/// Pack source backed by a JSON file that is validated once at open time.
#[derive(Clone, Debug)]
pub struct PackFileRepository {
    catalog: Arc<PackCatalog>,
}

impl PackFileRepository {
    /// Read and validate `path`.
    ///
    /// # Errors
    ///
    /// Returns `PackFileError` if the file cannot be read, parsed or validated.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PackFileError> {
        let path = path.as_ref();
        let catalog = PackFile::read(path)?.into_catalog()?;
        log::info!("loaded {} packs from {}", catalog.len(), path.display());
        Ok(Self {
            catalog: Arc::new(catalog),
        })
    }
}

#[async_trait]
impl PackRepository for PackFileRepository {
    async fn load_catalog(&self) -> Result<PackCatalog, StorageError> {
        Ok(self.catalog.as_ref().clone())
    }
}
