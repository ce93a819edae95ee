#![forbid(unsafe_code)]

pub mod builtin;
pub mod pack_file;
pub mod repository;
pub mod sqlite;

pub use repository::{
    InMemoryRepository, PREFERENCES_KEY, PackRepository, PreferencesRepository, Storage,
    StorageError,
};
