use async_trait::async_trait;
use drill_core::model::{Entry, Pack, PackCatalog};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::builtin;

/// Key under which the `{mode, pack}` preference record is stored.
pub const PREFERENCES_KEY: &str = "drill_game_cfg";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of an entry, shared by the built-in data and pack files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Persisted shape of a pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackRecord {
    pub name: String,
    pub entries: Vec<EntryRecord>,
}

impl PackRecord {
    /// Convert the record into a validated domain `Pack`.
    ///
    /// # Errors
    ///
    /// Returns `drill_core::Error` if an entry or the pack fails validation.
    pub fn into_pack(self) -> Result<Pack, drill_core::Error> {
        let entries = self
            .entries
            .into_iter()
            .map(|e| Entry::new(e.source, e.target, e.hint))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Pack::new(self.name, entries)?)
    }
}

/// Validate a list of records into a catalog, keeping their order.
///
/// # Errors
///
/// Returns `drill_core::Error` for invalid entries, packs or duplicate names.
pub fn catalog_from_records(records: Vec<PackRecord>) -> Result<PackCatalog, drill_core::Error> {
    let packs = records
        .into_iter()
        .map(PackRecord::into_pack)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PackCatalog::new(packs)?)
}

/// Source of vocabulary packs.
#[async_trait]
pub trait PackRepository: Send + Sync {
    /// Load every available pack.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored packs are invalid,
    /// or other storage errors.
    async fn load_catalog(&self) -> Result<PackCatalog, StorageError>;
}

/// String key-value store for small user preferences.
#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    /// Fetch the raw value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    async fn put_raw(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone)]
pub struct InMemoryRepository {
    packs: Arc<Vec<PackRecord>>,
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Repository serving the built-in packs.
    #[must_use]
    pub fn new() -> Self {
        Self::with_packs(builtin::pack_records())
    }

    #[must_use]
    pub fn with_packs(packs: Vec<PackRecord>) -> Self {
        Self {
            packs: Arc::new(packs),
            values: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl PackRepository for InMemoryRepository {
    async fn load_catalog(&self) -> Result<PackCatalog, StorageError> {
        catalog_from_records(self.packs.as_ref().clone())
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }
}

#[async_trait]
impl PreferencesRepository for InMemoryRepository {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn put_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Aggregates pack and preference repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub packs: Arc<dyn PackRepository>,
    pub preferences: Arc<dyn PreferencesRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let packs: Arc<dyn PackRepository> = Arc::new(repo.clone());
        let preferences: Arc<dyn PreferencesRepository> = Arc::new(repo);
        Self { packs, preferences }
    }

    /// Replace the pack source, keeping the preference store.
    #[must_use]
    pub fn with_packs(mut self, packs: Arc<dyn PackRepository>) -> Self {
        self.packs = packs;
        self
    }
}
