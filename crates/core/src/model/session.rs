use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::mode::QuizMode;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("correct count ({correct}) exceeds total rounds ({total})")]
    CountMismatch { correct: u32, total: u32 },
}

/// Final score of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pack_name: String,
    mode: QuizMode,
    correct_count: u32,
    total_rounds: u32,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl SessionSummary {
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if `completed_at` is
    /// before `started_at`, and `SessionSummaryError::CountMismatch` if more
    /// rounds were correct than were played.
    pub fn new(
        pack_name: impl Into<String>,
        mode: QuizMode,
        correct_count: u32,
        total_rounds: u32,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, SessionSummaryError> {
        if completed_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }
        if correct_count > total_rounds {
            return Err(SessionSummaryError::CountMismatch {
                correct: correct_count,
                total: total_rounds,
            });
        }

        Ok(Self {
            pack_name: pack_name.into(),
            mode,
            correct_count,
            total_rounds,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn pack_name(&self) -> &str {
        &self.pack_name
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Share of correct rounds in `[0, 1]`; zero for an empty session.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total_rounds == 0 {
            return 0.0;
        }
        f64::from(self.correct_count) / f64::from(self.total_rounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn summary_reports_score() {
        let now = fixed_now();
        let summary =
            SessionSummary::new("Liczby", QuizMode::Typing, 2, 3, now, now).unwrap();
        assert_eq!(summary.correct_count(), 2);
        assert_eq!(summary.total_rounds(), 3);
        assert!((summary.accuracy() - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_more_correct_than_rounds() {
        let now = fixed_now();
        let err = SessionSummary::new("Liczby", QuizMode::Typing, 4, 3, now, now).unwrap_err();
        assert_eq!(err, SessionSummaryError::CountMismatch { correct: 4, total: 3 });
    }

    #[test]
    fn rejects_inverted_time_range() {
        let now = fixed_now();
        let err = SessionSummary::new(
            "Liczby",
            QuizMode::Flashcard,
            0,
            3,
            now,
            now - chrono::Duration::seconds(1),
        )
        .unwrap_err();
        assert_eq!(err, SessionSummaryError::InvalidTimeRange);
    }
}
