use std::sync::Arc;

use drill_core::model::PackCatalog;
use storage::repository::{PackRepository, Storage};

use crate::Clock;
use crate::error::AppServicesError;
use crate::preferences_service::PreferencesService;
use crate::quiz::QuizService;
use crate::speech::{SpeechConfig, SpeechSink};

/// Knobs for the quiz controller chosen at startup.
#[derive(Debug, Clone, Default)]
pub struct QuizSettings {
    pub seed: Option<u64>,
    pub speech: SpeechConfig,
}

/// Assembles app-facing services over a loaded pack catalog.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<PackCatalog>,
    quiz: Arc<QuizService>,
    preferences: Arc<PreferencesService>,
}

impl AppServices {
    /// Load the catalog from `storage` and wire services around it.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Storage` if the packs cannot be loaded.
    pub async fn from_storage(
        storage: &Storage,
        clock: Clock,
        speech: Arc<dyn SpeechSink>,
        settings: QuizSettings,
    ) -> Result<Self, AppServicesError> {
        let catalog = Arc::new(storage.packs.load_catalog().await?);
        log::debug!("catalog loaded: {:?}", catalog.names());

        let mut quiz = QuizService::new(clock, Arc::clone(&catalog), speech)
            .with_speech_config(settings.speech);
        if let Some(seed) = settings.seed {
            quiz = quiz.with_seed(seed);
        }
        let preferences =
            PreferencesService::new(Arc::clone(&storage.preferences), Arc::clone(&catalog));

        Ok(Self {
            catalog,
            quiz: Arc::new(quiz),
            preferences: Arc::new(preferences),
        })
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<PackCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn preferences(&self) -> Arc<PreferencesService> {
        Arc::clone(&self.preferences)
    }
}
