//! Contract with the text-to-speech collaborator.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

pub const DEFAULT_LANGUAGE_PREFIX: &str = "de";
pub const DEFAULT_RATE: f32 = 0.95;

/// One utterance to play. A newer request supersedes any in-flight one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechRequest {
    pub text: String,
    pub language_prefix: String,
    pub rate: f32,
}

/// Language and rate applied to every request.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechConfig {
    language_prefix: String,
    rate: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            language_prefix: DEFAULT_LANGUAGE_PREFIX.to_owned(),
            rate: DEFAULT_RATE,
        }
    }
}

impl SpeechConfig {
    /// A blank prefix keeps the default language.
    #[must_use]
    pub fn new(language_prefix: impl Into<String>, rate: f32) -> Self {
        let language_prefix = language_prefix.into();
        let language_prefix = match language_prefix.trim() {
            "" => DEFAULT_LANGUAGE_PREFIX.to_owned(),
            prefix => prefix.to_owned(),
        };
        let rate = if rate.is_finite() && rate > 0.0 {
            rate
        } else {
            DEFAULT_RATE
        };
        Self {
            language_prefix,
            rate,
        }
    }

    #[must_use]
    pub fn language_prefix(&self) -> &str {
        &self.language_prefix
    }

    #[must_use]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    #[must_use]
    pub fn request(&self, text: impl Into<String>) -> SpeechRequest {
        SpeechRequest {
            text: text.into(),
            language_prefix: self.language_prefix.clone(),
            rate: self.rate,
        }
    }
}

/// Fire-and-forget speech output.
pub trait SpeechSink: Send + Sync {
    fn speak(&self, request: SpeechRequest);
}

/// Drops every request; used when no audio backend exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpeech;

impl SpeechSink for NoSpeech {
    fn speak(&self, request: SpeechRequest) {
        log::trace!("speech disabled, dropping {:?}", request.text);
    }
}

/// Keeps every request in memory.
#[derive(Debug, Default)]
pub struct RecordingSpeech {
    requests: Mutex<Vec<SpeechRequest>>,
}

impl RecordingSpeech {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn requests(&self) -> Vec<SpeechRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<SpeechRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl SpeechSink for RecordingSpeech {
    fn speak(&self, request: SpeechRequest) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
    }
}

/// A voice as reported by the speech engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VoiceInfo {
    pub name: String,
    pub lang: String,
}

/// Whether a BCP-47-ish tag such as `de-DE` or `de_AT` belongs to `prefix`.
#[must_use]
pub fn matches_language(tag: &str, prefix: &str) -> bool {
    let tag = tag.trim().to_ascii_lowercase();
    let prefix = prefix.trim().to_ascii_lowercase();
    if prefix.is_empty() {
        return false;
    }
    match tag.strip_prefix(&prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('-') || rest.starts_with('_'),
        None => false,
    }
}

/// First voice whose language matches `prefix`; `None` means the engine default.
#[must_use]
pub fn pick_voice<'a>(voices: &'a [VoiceInfo], prefix: &str) -> Option<&'a VoiceInfo> {
    voices
        .iter()
        .find(|voice| matches_language(&voice.lang, prefix))
}
