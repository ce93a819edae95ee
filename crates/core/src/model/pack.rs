use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::model::entry::Entry;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PackError {
    #[error("pack name cannot be empty")]
    EmptyName,

    #[error("pack {name:?} has no entries")]
    NoEntries { name: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog has no packs")]
    Empty,

    #[error("duplicate pack name: {0:?}")]
    DuplicateName(String),

    #[error("unknown pack: {0:?}")]
    UnknownPack(String),
}

//
// ─── PACK ──────────────────────────────────────────────────────────────────────
//

/// A named, ordered, non-empty list of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pack {
    name: String,
    entries: Vec<Entry>,
}

impl Pack {
    /// # Errors
    ///
    /// Returns `PackError::EmptyName` for a blank name and
    /// `PackError::NoEntries` when `entries` is empty.
    pub fn new(name: impl Into<String>, entries: Vec<Entry>) -> Result<Self, PackError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(PackError::EmptyName);
        }
        if entries.is_empty() {
            return Err(PackError::NoEntries {
                name: name.to_owned(),
            });
        }
        Ok(Self {
            name: name.to_owned(),
            entries,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Number of entries, which is also the number of rounds in a session.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Every pack available to the game, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackCatalog {
    packs: Vec<Arc<Pack>>,
}

impl PackCatalog {
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` with no packs and
    /// `CatalogError::DuplicateName` when two packs share a name.
    pub fn new(packs: Vec<Pack>) -> Result<Self, CatalogError> {
        if packs.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(packs.len());
        for pack in &packs {
            if !seen.insert(pack.name()) {
                return Err(CatalogError::DuplicateName(pack.name().to_owned()));
            }
        }
        Ok(Self {
            packs: packs.into_iter().map(Arc::new).collect(),
        })
    }

    /// Look a pack up by its display name.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownPack` if no pack has this name.
    pub fn get(&self, name: &str) -> Result<Arc<Pack>, CatalogError> {
        self.packs
            .iter()
            .find(|pack| pack.name() == name)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownPack(name.to_owned()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.packs.iter().any(|pack| pack.name() == name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.packs.iter().map(|pack| pack.name().to_owned()).collect()
    }

    /// The first pack; used as the default selection.
    #[must_use]
    pub fn first(&self) -> &Arc<Pack> {
        // The constructor guarantees at least one pack.
        &self.packs[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Pack>> {
        self.packs.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
