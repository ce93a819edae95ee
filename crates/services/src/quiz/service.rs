use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;

use drill_core::model::{PackCatalog, QuizMode};

use super::round::{RoundView, render_round};
use super::state::{AnswerOutcome, Progression, QuizSession};
use crate::Clock;
use crate::error::SessionError;
use crate::speech::{SpeechConfig, SpeechSink};

/// Controller facade over [`QuizSession`].
///
/// Owns the clock, the random source and the speech collaborator; the
/// session value itself stays with the caller.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    catalog: Arc<PackCatalog>,
    rng: Arc<Mutex<StdRng>>,
    speech: Arc<dyn SpeechSink>,
    speech_config: SpeechConfig,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<PackCatalog>, speech: Arc<dyn SpeechSink>) -> Self {
        Self {
            clock,
            catalog,
            rng: Arc::new(Mutex::new(StdRng::from_os_rng())),
            speech,
            speech_config: SpeechConfig::default(),
        }
    }

    /// Use a deterministic random source.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Arc::new(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    #[must_use]
    pub fn with_speech_config(mut self, config: SpeechConfig) -> Self {
        self.speech_config = config;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &PackCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn speech_config(&self) -> &SpeechConfig {
        &self.speech_config
    }

    /// Start a fresh session over `pack_name`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPack` if the catalog has no such pack.
    pub fn start_session(
        &self,
        pack_name: &str,
        mode: QuizMode,
    ) -> Result<QuizSession, SessionError> {
        let pack = self.catalog.get(pack_name)?;
        let session = QuizSession::start(pack, mode, &mut *self.rng(), self.clock.now());
        log::debug!(
            "session started: pack={:?} mode={} rounds={}",
            session.pack().name(),
            mode,
            session.total_rounds()
        );
        self.on_round_entered(&session);
        Ok(session)
    }

    /// Same as [`QuizService::start_session`] with a persisted mode key.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidMode` for an unknown key and
    /// `SessionError::InvalidPack` for an unknown pack.
    pub fn start_session_with_key(
        &self,
        pack_name: &str,
        mode_key: &str,
    ) -> Result<QuizSession, SessionError> {
        let mode = mode_key.parse::<QuizMode>()?;
        self.start_session(pack_name, mode)
    }

    /// # Errors
    ///
    /// See [`QuizSession::submit_answer`].
    pub fn submit_answer(
        &self,
        session: &mut QuizSession,
        raw: &str,
    ) -> Result<AnswerOutcome, SessionError> {
        let outcome = session.submit_answer(raw, &mut *self.rng(), self.clock.now())?;
        self.after_answer(session, &outcome);
        Ok(outcome)
    }

    /// # Errors
    ///
    /// See [`QuizSession::select_option`].
    pub fn select_option(
        &self,
        session: &mut QuizSession,
        position: usize,
    ) -> Result<AnswerOutcome, SessionError> {
        let outcome = session.select_option(position, &mut *self.rng(), self.clock.now())?;
        self.after_answer(session, &outcome);
        Ok(outcome)
    }

    /// Reveal the flashcard answer and return it.
    ///
    /// # Errors
    ///
    /// See [`QuizSession::reveal`].
    pub fn reveal(&self, session: &mut QuizSession) -> Result<String, SessionError> {
        session.reveal().map(|entry| entry.target().to_owned())
    }

    /// # Errors
    ///
    /// See [`QuizSession::advance`].
    pub fn advance(&self, session: &mut QuizSession) -> Result<Progression, SessionError> {
        let progression = session.advance(&mut *self.rng(), self.clock.now())?;
        self.after_progression(session, &progression);
        Ok(progression)
    }

    /// Replay the current target through the speech collaborator.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` once the session is finished.
    pub fn speak_current(&self, session: &QuizSession) -> Result<(), SessionError> {
        let entry = session.current_entry().ok_or(SessionError::Completed)?;
        self.speech.speak(self.speech_config.request(entry.target()));
        Ok(())
    }

    fn after_answer(&self, session: &QuizSession, outcome: &AnswerOutcome) {
        if let Some(progression) = &outcome.progression {
            self.after_progression(session, progression);
        }
    }

    fn after_progression(&self, session: &QuizSession, progression: &Progression) {
        match progression {
            Progression::Next => self.on_round_entered(session),
            Progression::Finished(summary) => log::debug!(
                "session finished: pack={:?} mode={} score={}/{}",
                summary.pack_name(),
                summary.mode(),
                summary.correct_count(),
                summary.total_rounds()
            ),
        }
    }

    /// Listening rounds speak their target before the options are shown.
    fn on_round_entered(&self, session: &QuizSession) {
        if let Some(text) = render_round(session).and_then(|view| view.speak) {
            self.speech.speak(self.speech_config.request(text));
        }
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for QuizService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizService")
            .field("clock", &self.clock)
            .field("packs", &self.catalog.len())
            .field("speech_config", &self.speech_config)
            .finish_non_exhaustive()
    }
}
