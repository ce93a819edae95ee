#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod preferences_service;
pub mod quiz;
pub mod speech;

pub use drill_core::Clock;

pub use app_services::{AppServices, QuizSettings};
pub use error::{AppServicesError, PreferencesServiceError, SessionError};
pub use preferences_service::PreferencesService;
pub use quiz::{
    AnswerOutcome, Feedback, OptionMark, Progression, QuizService, QuizSession, RoundKind,
    RoundOption, RoundStatus, RoundView, SessionProgress, render_round,
};
pub use speech::{NoSpeech, RecordingSpeech, SpeechConfig, SpeechRequest, SpeechSink, VoiceInfo};
