use drill_core::model::QuizMode;

use super::progress::SessionProgress;
use super::state::{QuizSession, RoundStatus};

/// Text shown on listening options until the player picks one.
pub const MASKED_OPTION: &str = "—";

/// Marker on an option after the player picked it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Unmarked,
    /// The player's pick, which was wrong.
    Wrong,
    /// The expected answer, shown after a miss.
    Correct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOption {
    pub label: String,
    pub masked: bool,
    pub mark: OptionMark,
}

/// Mode-specific body of a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundKind {
    /// Reveal affordance; `revealed` holds the answer once shown.
    Flashcard { revealed: Option<String> },
    Choice { options: Vec<RoundOption> },
    Typing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect { correct_text: String },
    Revealed { answer: String },
}

/// Everything a presentation layer needs to draw the current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundView {
    pub mode: QuizMode,
    pub instruction: &'static str,
    /// Entry source; absent in listening mode.
    pub prompt: Option<String>,
    pub hint: Option<String>,
    pub kind: RoundKind,
    pub progress: SessionProgress,
    pub feedback: Option<Feedback>,
    /// Target text to be spoken when the round is entered.
    pub speak: Option<String>,
    pub can_advance: bool,
}

#[must_use]
pub fn instruction(mode: QuizMode) -> &'static str {
    match mode {
        QuizMode::Flashcard => "Recall the translation, then reveal it.",
        QuizMode::MultipleChoice => "Choose the translation:",
        QuizMode::Listening => "Listen and choose the phrase you heard.",
        QuizMode::Typing => "Type the translation:",
    }
}

/// Describe the current round. Returns `None` once the session is finished.
#[must_use]
pub fn render_round(session: &QuizSession) -> Option<RoundView> {
    let entry = session.current_entry()?;
    let mode = session.mode();
    let status = session.status();
    let target = entry.target();

    let kind = match mode {
        QuizMode::Flashcard => RoundKind::Flashcard {
            revealed: session.is_revealed().then(|| target.to_owned()),
        },
        QuizMode::MultipleChoice | QuizMode::Listening => {
            let masked = mode == QuizMode::Listening;
            let judged = status == RoundStatus::Incorrect;
            let options = session
                .options()
                .iter()
                .enumerate()
                .filter_map(|(position, &index)| {
                    let text = session.pack().entry(index)?.target();
                    let picked = session.selected_option() == Some(position);
                    let mark = if picked {
                        OptionMark::Wrong
                    } else if judged && text == target {
                        OptionMark::Correct
                    } else {
                        OptionMark::Unmarked
                    };
                    let hidden = masked && mark == OptionMark::Unmarked;
                    Some(RoundOption {
                        label: if hidden {
                            MASKED_OPTION.to_owned()
                        } else {
                            text.to_owned()
                        },
                        masked: hidden,
                        mark,
                    })
                })
                .collect();
            RoundKind::Choice { options }
        }
        QuizMode::Typing => RoundKind::Typing,
    };

    let feedback = match status {
        RoundStatus::Pending => None,
        RoundStatus::Correct => Some(Feedback::Correct),
        RoundStatus::Incorrect => Some(Feedback::Incorrect {
            correct_text: target.to_owned(),
        }),
        RoundStatus::Revealed => Some(Feedback::Revealed {
            answer: target.to_owned(),
        }),
    };

    Some(RoundView {
        mode,
        instruction: instruction(mode),
        prompt: (mode != QuizMode::Listening).then(|| entry.source().to_owned()),
        hint: entry.hint().map(str::to_owned),
        kind,
        progress: session.progress(),
        feedback,
        speak: (mode == QuizMode::Listening).then(|| target.to_owned()),
        can_advance: matches!(status, RoundStatus::Incorrect | RoundStatus::Revealed),
    })
}
