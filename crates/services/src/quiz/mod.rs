mod progress;
mod round;
mod service;
mod shuffle;
mod state;

pub use progress::SessionProgress;
pub use round::{
    Feedback, MASKED_OPTION, OptionMark, RoundKind, RoundOption, RoundView, instruction,
    render_round,
};
pub use service::QuizService;
pub use shuffle::{shuffle, shuffled_indices};
pub use state::{AnswerOutcome, MAX_OPTIONS, Progression, QuizSession, RoundStatus};
