use crate::model::mode::QuizMode;
use crate::model::pack::PackCatalog;

/// Last mode and pack the player picked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preferences {
    mode: QuizMode,
    pack: String,
}

/// Unvalidated preference values as read from storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreferencesDraft {
    pub mode: Option<String>,
    pub pack: Option<String>,
}

impl PreferencesDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the draft against the catalog, field by field.
    ///
    /// A missing or unrecognized mode falls back to `QuizMode::default()`; a
    /// missing or unknown pack falls back to the first pack of the catalog.
    #[must_use]
    pub fn resolve(self, catalog: &PackCatalog) -> Preferences {
        let mode = normalize_optional(self.mode)
            .and_then(|key| key.parse::<QuizMode>().ok())
            .unwrap_or_default();
        let pack = normalize_optional(self.pack)
            .filter(|name| catalog.contains(name))
            .unwrap_or_else(|| catalog.first().name().to_owned());
        Preferences { mode, pack }
    }
}

impl Preferences {
    /// Build preferences from an already known mode and pack.
    #[must_use]
    pub fn new(mode: QuizMode, pack: impl Into<String>) -> Self {
        Self {
            mode,
            pack: pack.into(),
        }
    }

    #[must_use]
    pub fn defaults_for(catalog: &PackCatalog) -> Self {
        PreferencesDraft::new().resolve(catalog)
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    #[must_use]
    pub fn pack(&self) -> &str {
        &self.pack
    }

    #[must_use]
    pub fn with_mode(mut self, mode: QuizMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_pack(mut self, pack: impl Into<String>) -> Self {
        self.pack = pack.into();
        self
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entry, Pack};

    fn catalog() -> PackCatalog {
        let one = |name: &str| {
            Pack::new(name, vec![Entry::new("jeden", "eins", None).unwrap()]).unwrap()
        };
        PackCatalog::new(vec![one("Powitania"), one("Liczby")]).unwrap()
    }

    #[test]
    fn empty_draft_resolves_to_defaults() {
        let prefs = PreferencesDraft::new().resolve(&catalog());
        assert_eq!(prefs.mode(), QuizMode::Flashcard);
        assert_eq!(prefs.pack(), "Powitania");
    }

    #[test]
    fn valid_draft_is_kept() {
        let prefs = PreferencesDraft {
            mode: Some("typing".into()),
            pack: Some(" Liczby ".into()),
        }
        .resolve(&catalog());
        assert_eq!(prefs, Preferences::new(QuizMode::Typing, "Liczby"));
    }

    #[test]
    fn invalid_fields_fall_back_independently() {
        let prefs = PreferencesDraft {
            mode: Some("leitner".into()),
            pack: Some("Liczby".into()),
        }
        .resolve(&catalog());
        assert_eq!(prefs.mode(), QuizMode::Flashcard);
        assert_eq!(prefs.pack(), "Liczby");

        let prefs = PreferencesDraft {
            mode: Some("listening".into()),
            pack: Some("Gone".into()),
        }
        .resolve(&catalog());
        assert_eq!(prefs.mode(), QuizMode::Listening);
        assert_eq!(prefs.pack(), "Powitania");
    }
}
