use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EntryError {
    #[error("entry source text cannot be empty")]
    EmptySource,

    #[error("entry target text cannot be empty")]
    EmptyTarget,
}

/// One vocabulary pair.
///
/// `source` is the prompt in the learner's native language and `target` is
/// the phrase being learned. The optional hint is carried along for display
/// and never takes part in answer checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    source: String,
    target: String,
    hint: Option<String>,
}

impl Entry {
    /// # Errors
    ///
    /// Returns `EntryError` if `source` or `target` is blank.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        hint: Option<String>,
    ) -> Result<Self, EntryError> {
        let source = source.into();
        let target = target.into();
        if source.trim().is_empty() {
            return Err(EntryError::EmptySource);
        }
        if target.trim().is_empty() {
            return Err(EntryError::EmptyTarget);
        }

        let hint = hint
            .map(|h| h.trim().to_owned())
            .filter(|h| !h.is_empty());

        Ok(Self {
            source: source.trim().to_owned(),
            target: target.trim().to_owned(),
            hint,
        })
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }
}
