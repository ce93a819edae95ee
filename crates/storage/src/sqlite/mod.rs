//! `SQLite` key/value store for the saved `{mode, pack}` preference record.
//!
//! Packs never touch the database; [`Storage::sqlite`] pairs this store with
//! the built-in catalog.

use std::sync::Arc;
use std::time::Duration;

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use thiserror::Error;

use crate::repository::{InMemoryRepository, PackRepository, PreferencesRepository, Storage};

mod migrate;
mod preferences_repo;

/// A single small record is written at a time, so a couple of connections
/// are plenty.
const MAX_CONNECTIONS: u32 = 2;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
const CONNECTION_PRAGMAS: [&str; 2] = ["PRAGMA journal_mode = WAL;", "PRAGMA busy_timeout = 5000;"];

/// Preference store backed by a `preferences` key/value table.
#[derive(Clone)]
pub struct SqlitePreferenceStore {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl SqlitePreferenceStore {
    /// Open the preference database at `database_url`.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the file cannot be opened or a
    /// connection pragma is rejected.
    pub async fn open(database_url: &str) -> Result<Self, SqliteInitError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    for pragma in CONNECTION_PRAGMAS {
                        sqlx::query(pragma).execute(&mut *conn).await?;
                    }
                    Ok(())
                })
            })
            .connect(database_url)
            .await?;
        let store = Self { pool };
        migrate::run_migrations(&store.pool).await?;
        Ok(store)
    }
}

impl Storage {
    /// Preferences in `SQLite`, packs from the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the database cannot be opened or its
    /// schema cannot be brought up to date.
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let store = SqlitePreferenceStore::open(database_url).await?;
        let packs: Arc<dyn PackRepository> = Arc::new(InMemoryRepository::new());
        let preferences: Arc<dyn PreferencesRepository> = Arc::new(store);
        Ok(Self { packs, preferences })
    }
}
