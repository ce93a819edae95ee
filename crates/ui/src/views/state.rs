use dioxus::prelude::*;
use services::SessionError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    /// The pack or mode picked in the form no longer exists.
    InvalidSelection,
    /// The action does not apply to the current round.
    NotAllowed,
    SessionFinished,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::InvalidSelection => "That pack or mode is not available.",
            ViewError::NotAllowed => "That action is not available right now.",
            ViewError::SessionFinished => "This round is over. Start a new one.",
        }
    }
}

impl From<SessionError> for ViewError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidPack(_) | SessionError::InvalidMode(_) => {
                ViewError::InvalidSelection
            }
            SessionError::Completed => ViewError::SessionFinished,
            SessionError::ActionUnavailable { .. }
            | SessionError::AlreadyAnswered
            | SessionError::OptionOutOfRange { .. } => ViewError::NotAllowed,
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
