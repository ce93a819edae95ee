use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use drill_core::model::{CatalogError, PackCatalog, Preferences, PreferencesDraft};
use storage::repository::{PREFERENCES_KEY, PreferencesRepository};

use crate::error::PreferencesServiceError;

#[derive(Serialize)]
struct PreferencesRecord<'a> {
    mode: &'a str,
    pack: &'a str,
}

/// Loads and stores the last chosen mode and pack.
#[derive(Clone)]
pub struct PreferencesService {
    repo: Arc<dyn PreferencesRepository>,
    catalog: Arc<PackCatalog>,
}

impl PreferencesService {
    #[must_use]
    pub fn new(repo: Arc<dyn PreferencesRepository>, catalog: Arc<PackCatalog>) -> Self {
        Self { repo, catalog }
    }

    /// Load persisted preferences, falling back per field to defaults.
    ///
    /// Never fails: a missing record, malformed JSON, an unknown mode, an
    /// unknown pack, or a storage failure all resolve to defaults.
    pub async fn load(&self) -> Preferences {
        let raw = match self.repo.get_raw(PREFERENCES_KEY).await {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("failed to read preferences, using defaults: {err}");
                None
            }
        };
        let draft = raw.as_deref().map(parse_draft).unwrap_or_default();
        let prefs = draft.clone().resolve(&self.catalog);

        if draft.mode.as_deref().is_some_and(|mode| mode.trim() != prefs.mode().key()) {
            log::warn!("ignoring stored mode {:?}", draft.mode);
        }
        if draft.pack.as_deref().is_some_and(|pack| pack.trim() != prefs.pack()) {
            log::warn!("ignoring stored pack {:?}", draft.pack);
        }
        prefs
    }

    /// Persist `prefs`.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesServiceError::Catalog` if the pack is not in the
    /// catalog, or `PreferencesServiceError::Storage` if writing fails.
    pub async fn save(&self, prefs: &Preferences) -> Result<(), PreferencesServiceError> {
        if !self.catalog.contains(prefs.pack()) {
            return Err(CatalogError::UnknownPack(prefs.pack().to_owned()).into());
        }
        let json = serde_json::to_string(&PreferencesRecord {
            mode: prefs.mode().key(),
            pack: prefs.pack(),
        })?;
        self.repo.put_raw(PREFERENCES_KEY, &json).await?;
        Ok(())
    }

    /// Forget stored preferences and return the defaults.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesServiceError::Storage` if the record cannot be removed.
    pub async fn reset(&self) -> Result<Preferences, PreferencesServiceError> {
        self.repo.remove(PREFERENCES_KEY).await?;
        log::info!("preferences reset");
        Ok(Preferences::defaults_for(&self.catalog))
    }
}

/// Pull `mode` and `pack` strings out of a stored record, ignoring anything else.
fn parse_draft(raw: &str) -> PreferencesDraft {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("stored preferences are not valid JSON: {err}");
            return PreferencesDraft::new();
        }
    };
    let field = |name: &str| {
        value
            .get(name)
            .and_then(Value::as_str)
            .map(str::to_owned)
    };
    PreferencesDraft {
        mode: field("mode"),
        pack: field("pack"),
    }
}
