use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModeError {
    #[error("unknown quiz mode: {0:?}")]
    Unknown(String),
}

/// How a round is asked and answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    /// Show the prompt, reveal the answer on request. Never scored.
    #[default]
    #[serde(rename = "flashcards")]
    Flashcard,
    /// Pick the translation among up to four candidates.
    #[serde(rename = "multiple")]
    MultipleChoice,
    /// Hear the phrase, pick it among masked candidates.
    Listening,
    /// Type the translation.
    Typing,
}

impl QuizMode {
    pub const ALL: [QuizMode; 4] = [
        QuizMode::Flashcard,
        QuizMode::MultipleChoice,
        QuizMode::Listening,
        QuizMode::Typing,
    ];

    /// Stable key used in persisted preferences.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            QuizMode::Flashcard => "flashcards",
            QuizMode::MultipleChoice => "multiple",
            QuizMode::Listening => "listening",
            QuizMode::Typing => "typing",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            QuizMode::Flashcard => "Flashcards",
            QuizMode::MultipleChoice => "Multiple choice",
            QuizMode::Listening => "Listening",
            QuizMode::Typing => "Typing",
        }
    }

    /// Whether rounds in this mode present a set of options.
    #[must_use]
    pub fn has_options(self) -> bool {
        matches!(self, QuizMode::MultipleChoice | QuizMode::Listening)
    }

    /// Whether answers in this mode are judged and scored.
    #[must_use]
    pub fn is_scored(self) -> bool {
        !matches!(self, QuizMode::Flashcard)
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for QuizMode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuizMode::ALL
            .into_iter()
            .find(|mode| mode.key() == s.trim())
            .ok_or_else(|| ModeError::Unknown(s.to_owned()))
    }
}
