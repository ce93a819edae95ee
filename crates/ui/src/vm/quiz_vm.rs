use drill_core::model::{Preferences, QuizMode, SessionSummary};
use services::{AnswerOutcome, QuizService, QuizSession, RoundView};

use crate::views::ViewError;

/// Discrete user actions forwarded from the quiz screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Start,
    SelectOption(usize),
    SubmitTyped(String),
    Reveal,
    Advance,
    Speak,
    ModeChanged(QuizMode),
    PackChanged(String),
    ResetPreferences,
}

/// Asynchronous follow-up the view has to run after an intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizEffect {
    None,
    SavePreferences(Preferences),
    ResetPreferences,
}

/// Short message about the round that was just left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Correct { answer: String },
}

impl Notice {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Notice::Correct { answer } => format!("Correct! {answer}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct QuizVm {
    prefs: Preferences,
    session: Option<QuizSession>,
    notice: Option<Notice>,
}

impl QuizVm {
    #[must_use]
    pub fn new(prefs: Preferences) -> Self {
        Self {
            prefs,
            session: None,
            notice: None,
        }
    }

    #[must_use]
    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn round_view(&self) -> Option<RoundView> {
        self.session.as_ref().and_then(services::render_round)
    }

    #[must_use]
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.session.as_ref().and_then(QuizSession::summary)
    }

    /// Apply one intent to the session and preferences.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::NotAllowed` when no session is running or the
    /// session rejects the action, `ViewError::InvalidSelection` for an
    /// unknown pack, and `ViewError::SessionFinished` after the last round.
    pub fn apply(&mut self, intent: QuizIntent, quiz: &QuizService) -> Result<QuizEffect, ViewError> {
        self.notice = None;
        match intent {
            QuizIntent::Start => {
                let session = quiz.start_session(self.prefs.pack(), self.prefs.mode())?;
                self.session = Some(session);
                Ok(QuizEffect::None)
            }
            QuizIntent::SelectOption(position) => {
                let outcome = quiz.select_option(self.active_session()?, position)?;
                self.record(outcome);
                Ok(QuizEffect::None)
            }
            QuizIntent::SubmitTyped(text) => {
                let outcome = quiz.submit_answer(self.active_session()?, &text)?;
                self.record(outcome);
                Ok(QuizEffect::None)
            }
            QuizIntent::Reveal => {
                quiz.reveal(self.active_session()?)?;
                Ok(QuizEffect::None)
            }
            QuizIntent::Advance => {
                quiz.advance(self.active_session()?)?;
                Ok(QuizEffect::None)
            }
            QuizIntent::Speak => {
                quiz.speak_current(self.active_session()?)?;
                Ok(QuizEffect::None)
            }
            QuizIntent::ModeChanged(mode) => {
                self.prefs = self.prefs.clone().with_mode(mode);
                Ok(QuizEffect::SavePreferences(self.prefs.clone()))
            }
            QuizIntent::PackChanged(name) => {
                if !quiz.catalog().contains(&name) {
                    return Err(ViewError::InvalidSelection);
                }
                self.prefs = self.prefs.clone().with_pack(name);
                Ok(QuizEffect::SavePreferences(self.prefs.clone()))
            }
            QuizIntent::ResetPreferences => {
                self.prefs = Preferences::defaults_for(quiz.catalog());
                self.session = None;
                Ok(QuizEffect::ResetPreferences)
            }
        }
    }

    fn active_session(&mut self) -> Result<&mut QuizSession, ViewError> {
        self.session.as_mut().ok_or(ViewError::NotAllowed)
    }

    fn record(&mut self, outcome: AnswerOutcome) {
        if outcome.correct {
            self.notice = Some(Notice::Correct {
                answer: outcome.correct_text,
            });
        }
    }
}

#[must_use]
pub fn progress_label(view: &RoundView) -> String {
    format!(
        "Round {} / {} • Points: {}",
        view.progress.current, view.progress.total, view.progress.correct
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use drill_core::model::{Entry, Pack, PackCatalog};
    use drill_core::time::fixed_clock;
    use services::{NoSpeech, RoundKind};

    fn quiz() -> QuizService {
        let pack = |name: &str| {
            let entries = [("jeden", "eins"), ("dwa", "zwei")]
                .into_iter()
                .map(|(s, t)| Entry::new(s, t, None).unwrap())
                .collect();
            Pack::new(name, entries).unwrap()
        };
        let catalog = PackCatalog::new(vec![pack("Liczby"), pack("Zahlen")]).unwrap();
        QuizService::new(fixed_clock(), Arc::new(catalog), Arc::new(NoSpeech)).with_seed(1)
    }

    #[test]
    fn round_intents_need_a_session() {
        let quiz = quiz();
        let mut vm = QuizVm::new(Preferences::defaults_for(quiz.catalog()));
        assert_eq!(vm.apply(QuizIntent::Reveal, &quiz), Err(ViewError::NotAllowed));
        assert!(vm.round_view().is_none());
    }

    #[test]
    fn start_uses_current_preferences() {
        let quiz = quiz();
        let mut vm = QuizVm::new(Preferences::new(QuizMode::Typing, "Zahlen"));
        vm.apply(QuizIntent::Start, &quiz).unwrap();
        let view = vm.round_view().unwrap();
        assert_eq!(view.kind, RoundKind::Typing);
        assert_eq!(vm.session().unwrap().pack().name(), "Zahlen");
        assert_eq!(progress_label(&view), "Round 1 / 2 • Points: 0");
    }

    #[test]
    fn correct_answer_leaves_a_notice() {
        let quiz = quiz();
        let mut vm = QuizVm::new(Preferences::new(QuizMode::Typing, "Liczby"));
        vm.apply(QuizIntent::Start, &quiz).unwrap();
        let answer = vm.session().unwrap().current_entry().unwrap().target().to_owned();
        vm.apply(QuizIntent::SubmitTyped(answer.clone()), &quiz).unwrap();
        assert_eq!(vm.notice(), Some(&Notice::Correct { answer }));

        vm.apply(QuizIntent::Advance, &quiz).unwrap();
        assert_eq!(vm.notice(), None);
        assert!(vm.summary().is_some());
    }

    #[test]
    fn preference_changes_request_saving() {
        let quiz = quiz();
        let mut vm = QuizVm::new(Preferences::defaults_for(quiz.catalog()));
        let effect = vm.apply(QuizIntent::ModeChanged(QuizMode::Listening), &quiz).unwrap();
        assert_eq!(
            effect,
            QuizEffect::SavePreferences(Preferences::new(QuizMode::Listening, "Liczby"))
        );
        let effect = vm.apply(QuizIntent::PackChanged("Zahlen".into()), &quiz).unwrap();
        assert_eq!(
            effect,
            QuizEffect::SavePreferences(Preferences::new(QuizMode::Listening, "Zahlen"))
        );
        assert_eq!(
            vm.apply(QuizIntent::PackChanged("Farben".into()), &quiz),
            Err(ViewError::InvalidSelection)
        );
    }

    #[test]
    fn reset_returns_to_defaults() {
        let quiz = quiz();
        let mut vm = QuizVm::new(Preferences::new(QuizMode::Typing, "Zahlen"));
        vm.apply(QuizIntent::Start, &quiz).unwrap();
        let effect = vm.apply(QuizIntent::ResetPreferences, &quiz).unwrap();
        assert_eq!(effect, QuizEffect::ResetPreferences);
        assert_eq!(vm.prefs(), &Preferences::new(QuizMode::Flashcard, "Liczby"));
        assert!(vm.session().is_none());
    }
}
