use std::sync::Arc;

use drill_core::model::PackCatalog;
use services::{PreferencesService, QuizService};

pub trait UiApp: Send + Sync {
    fn catalog(&self) -> Arc<PackCatalog>;
    fn quiz(&self) -> Arc<QuizService>;
    fn preferences(&self) -> Arc<PreferencesService>;
}

#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<PackCatalog>,
    quiz: Arc<QuizService>,
    preferences: Arc<PreferencesService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog: app.catalog(),
            quiz: app.quiz(),
            preferences: app.preferences(),
        }
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

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
