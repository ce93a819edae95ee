use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;

use drill_core::answers_match;
use drill_core::model::{Entry, Pack, QuizMode, SessionSummary};

use super::progress::SessionProgress;
use super::shuffle::{shuffle, shuffled_indices};
use crate::error::SessionError;

/// Upper bound on the options shown in choice modes.
pub const MAX_OPTIONS: usize = 4;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Judgement of the round currently on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoundStatus {
    #[default]
    Pending,
    Correct,
    Incorrect,
    Revealed,
}

/// What happened after the session moved past a round.
#[derive(Debug, Clone, PartialEq)]
pub enum Progression {
    /// A new round is active.
    Next,
    /// The last round was consumed.
    Finished(SessionSummary),
}

/// Result of checking one answer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// The expected answer, shown to the player after a miss.
    pub correct_text: String,
    /// Set when a correct answer auto-advanced the session.
    pub progression: Option<Progression>,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One pass over a pack in a single mode.
///
/// Every entry is asked exactly once, in a shuffled order. The options of a
/// choice round are drawn when the round is entered, so rendering the same
/// state twice yields the same view.
#[derive(Clone)]
pub struct QuizSession {
    pack: Arc<Pack>,
    mode: QuizMode,
    order: Vec<usize>,
    round: usize,
    correct_count: u32,
    status: RoundStatus,
    options: Vec<usize>,
    selected: Option<usize>,
    started_at: DateTime<Utc>,
    summary: Option<SessionSummary>,
}

impl QuizSession {
    /// Shuffle the pack and enter the first round.
    pub fn start<R: Rng>(
        pack: Arc<Pack>,
        mode: QuizMode,
        rng: &mut R,
        started_at: DateTime<Utc>,
    ) -> Self {
        let order = shuffled_indices(pack.len(), rng);
        let mut session = Self {
            pack,
            mode,
            order,
            round: 0,
            correct_count: 0,
            status: RoundStatus::Pending,
            options: Vec::new(),
            selected: None,
            started_at,
            summary: None,
        };
        session.enter_round(rng);
        session
    }

    #[must_use]
    pub fn pack(&self) -> &Arc<Pack> {
        &self.pack
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    /// Entry indices in the order they are asked.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Zero-based round index; equals `total_rounds()` once finished.
    #[must_use]
    pub fn round(&self) -> usize {
        self.round
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total_rounds(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.status == RoundStatus::Revealed
    }

    /// Entry indices offered in the current round; empty outside choice modes.
    #[must_use]
    pub fn options(&self) -> &[usize] {
        &self.options
    }

    /// Position of the option picked in the current round, if any.
    #[must_use]
    pub fn selected_option(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.summary.is_some()
    }

    #[must_use]
    pub fn current_entry(&self) -> Option<&Entry> {
        if self.is_complete() {
            return None;
        }
        self.order
            .get(self.round)
            .and_then(|&index| self.pack.entry(index))
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            current: (self.round + 1).min(self.total_rounds()),
            total: self.total_rounds(),
            correct: self.correct_count,
            is_complete: self.is_complete(),
        }
    }

    /// Check a typed (or otherwise free-form) answer against the current entry.
    ///
    /// A correct answer scores and auto-advances; a wrong one leaves the
    /// round open until `advance` is called.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the last round,
    /// `SessionError::ActionUnavailable` in flashcard mode and
    /// `SessionError::AlreadyAnswered` if the round was already judged.
    pub fn submit_answer<R: Rng>(
        &mut self,
        raw: &str,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<AnswerOutcome, SessionError> {
        self.ensure_answerable()?;
        let expected = self
            .current_entry()
            .ok_or(SessionError::Completed)?
            .target()
            .to_owned();

        if !answers_match(raw, &expected) {
            self.status = RoundStatus::Incorrect;
            return Ok(AnswerOutcome {
                correct: false,
                correct_text: expected,
                progression: None,
            });
        }

        self.correct_count += 1;
        self.status = RoundStatus::Correct;
        let progression = self.advance(rng, now)?;
        Ok(AnswerOutcome {
            correct: true,
            correct_text: expected,
            progression: Some(progression),
        })
    }

    /// Pick one of the current round's options by position.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::ActionUnavailable` outside choice modes,
    /// `SessionError::OptionOutOfRange` for a bad position, and the errors of
    /// [`QuizSession::submit_answer`].
    pub fn select_option<R: Rng>(
        &mut self,
        position: usize,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<AnswerOutcome, SessionError> {
        self.ensure_active()?;
        if !self.mode.has_options() {
            return Err(self.unavailable("choosing an option"));
        }
        let Some(&entry_index) = self.options.get(position) else {
            return Err(SessionError::OptionOutOfRange {
                index: position,
                len: self.options.len(),
            });
        };
        let text = self
            .pack
            .entry(entry_index)
            .map(|entry| entry.target().to_owned())
            .unwrap_or_default();

        let outcome = self.submit_answer(&text, rng, now)?;
        if !outcome.correct {
            self.selected = Some(position);
        }
        Ok(outcome)
    }

    /// Show the answer of a flashcard. Repeating it is harmless.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the last round and
    /// `SessionError::ActionUnavailable` in any mode but flashcards.
    pub fn reveal(&mut self) -> Result<&Entry, SessionError> {
        self.ensure_active()?;
        if self.mode != QuizMode::Flashcard {
            return Err(self.unavailable("revealing the answer"));
        }
        self.status = RoundStatus::Revealed;
        self.current_entry().ok_or(SessionError::Completed)
    }

    /// Move to the next round, or finish after the last one.
    ///
    /// Allowed from any active round; skipping a round leaves it unscored.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the session already finished.
    pub fn advance<R: Rng>(
        &mut self,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<Progression, SessionError> {
        self.ensure_active()?;
        self.round += 1;

        if self.round >= self.order.len() {
            self.options.clear();
            self.selected = None;
            let total = u32::try_from(self.order.len()).unwrap_or(u32::MAX);
            let summary = SessionSummary::new(
                self.pack.name(),
                self.mode,
                self.correct_count,
                total,
                self.started_at,
                now.max(self.started_at),
            )?;
            self.summary = Some(summary.clone());
            return Ok(Progression::Finished(summary));
        }

        self.enter_round(rng);
        Ok(Progression::Next)
    }

    fn enter_round<R: Rng>(&mut self, rng: &mut R) {
        self.status = RoundStatus::Pending;
        self.selected = None;
        self.options = match (self.mode.has_options(), self.order.get(self.round)) {
            (true, Some(&correct)) => draw_options(&self.pack, correct, rng),
            _ => Vec::new(),
        };
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        if self.is_complete() {
            Err(SessionError::Completed)
        } else {
            Ok(())
        }
    }

    fn ensure_answerable(&self) -> Result<(), SessionError> {
        self.ensure_active()?;
        if !self.mode.is_scored() {
            return Err(self.unavailable("answering"));
        }
        if self.status != RoundStatus::Pending {
            return Err(SessionError::AlreadyAnswered);
        }
        Ok(())
    }

    fn unavailable(&self, action: &'static str) -> SessionError {
        SessionError::ActionUnavailable {
            mode: self.mode,
            action,
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("pack", &self.pack.name())
            .field("mode", &self.mode)
            .field("round", &self.round)
            .field("total", &self.order.len())
            .field("correct_count", &self.correct_count)
            .field("status", &self.status)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// The correct entry plus random distractors with distinct target text, shuffled.
///
/// Distractors are drawn uniformly with rejection of targets already
/// present, until `min(MAX_OPTIONS, distinct targets)` options exist.
fn draw_options<R: Rng>(pack: &Pack, correct: usize, rng: &mut R) -> Vec<usize> {
    let entries = pack.entries();
    let distinct = entries
        .iter()
        .map(Entry::target)
        .collect::<HashSet<_>>()
        .len();
    let wanted = MAX_OPTIONS.min(distinct);

    let mut options = vec![correct];
    while options.len() < wanted {
        let candidate = rng.random_range(0..entries.len());
        let text = entries[candidate].target();
        if !options.iter().any(|&index| entries[index].target() == text) {
            options.push(candidate);
        }
    }
    shuffle(&mut options, rng);
    options
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
