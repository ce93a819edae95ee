use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use drill_core::model::{Preferences, QuizMode};
use storage::repository::{
    InMemoryRepository, PREFERENCES_KEY, PreferencesRepository, Storage, StorageError,
};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_storage};
use crate::vm::QuizIntent;

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_default_selection() {
    let mut harness = setup_view_harness(ViewKind::Quiz).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Powitania i podstawy"), "missing pack in {html}");
    assert!(html.contains("Flashcards"), "missing mode in {html}");
    assert!(html.contains("Pick a mode and a pack"), "missing idle hint in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_restores_saved_preferences() {
    let storage = Storage::in_memory();
    storage
        .preferences
        .put_raw(PREFERENCES_KEY, r#"{"mode":"typing","pack":"Zwroty ważne"}"#)
        .await
        .expect("seed preferences");

    let mut harness = setup_view_harness_with_storage(ViewKind::Quiz, storage).await;
    harness.rebuild();
    harness.drive_async().await;

    let prefs = harness.with_vm(|vm| vm.prefs().clone());
    assert_eq!(prefs, Preferences::new(QuizMode::Typing, "Zwroty ważne"));
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_typing_round_flow() {
    let mut harness = setup_view_harness(ViewKind::Quiz).await;
    harness.rebuild();
    harness.drive_async().await;

    harness.dispatch(QuizIntent::ModeChanged(QuizMode::Typing)).await;
    let stored = harness
        .storage
        .preferences
        .get_raw(PREFERENCES_KEY)
        .await
        .expect("read preferences")
        .expect("preferences saved");
    assert!(stored.contains(r#""mode":"typing""#), "unexpected record {stored}");

    harness.dispatch(QuizIntent::Start).await;
    let html = harness.render();
    assert!(html.contains("quiz-typing"), "missing typing input in {html}");
    assert!(html.contains("Round 1 / 15 • Points: 0"), "missing progress in {html}");

    let answer = harness.with_vm(|vm| {
        vm.session()
            .and_then(|session| session.current_entry())
            .map(|entry| entry.target().to_owned())
            .expect("current entry")
    });
    harness.dispatch(QuizIntent::SubmitTyped(format!("  {answer}  "))).await;
    let html = harness.render();
    assert!(html.contains("Correct!"), "missing notice in {html}");
    assert!(html.contains("Round 2 / 15 • Points: 1"), "missing progress in {html}");

    harness.dispatch(QuizIntent::SubmitTyped("xyz".into())).await;
    let html = harness.render();
    assert!(html.contains("Not quite."), "missing feedback in {html}");
    assert!(html.contains("Next"), "missing next button in {html}");

    harness.dispatch(QuizIntent::Advance).await;
    let html = harness.render();
    assert!(html.contains("Round 3 / 15 • Points: 1"), "missing progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_listening_speaks_on_round_entry() {
    let mut harness = setup_view_harness(ViewKind::Quiz).await;
    harness.rebuild();
    harness.drive_async().await;

    harness.dispatch(QuizIntent::ModeChanged(QuizMode::Listening)).await;
    harness.dispatch(QuizIntent::Start).await;
    assert_eq!(harness.speech.requests().len(), 1);

    let html = harness.render();
    assert!(!html.contains("quiz-prompt"), "listening must hide the prompt: {html}");
    assert!(html.contains("Play again"), "missing replay button in {html}");

    harness.dispatch(QuizIntent::Speak).await;
    let requests = harness.speech.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], requests[1]);
    assert_eq!(requests[0].language_prefix, "de");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reports_unavailable_actions() {
    let mut harness = setup_view_harness(ViewKind::Quiz).await;
    harness.rebuild();
    harness.drive_async().await;

    harness.dispatch(QuizIntent::Reveal).await;
    let html = harness.render();
    assert!(
        html.contains("That action is not available right now."),
        "missing error in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reset_clears_saved_preferences() {
    let storage = Storage::in_memory();
    storage
        .preferences
        .put_raw(PREFERENCES_KEY, r#"{"mode":"multiple","pack":"Liczby 0–10"}"#)
        .await
        .expect("seed preferences");
    let mut harness = setup_view_harness_with_storage(ViewKind::Quiz, storage).await;
    harness.rebuild();
    harness.drive_async().await;

    harness.dispatch(QuizIntent::Start).await;
    harness.dispatch(QuizIntent::ResetPreferences).await;

    let stored = harness
        .storage
        .preferences
        .get_raw(PREFERENCES_KEY)
        .await
        .expect("read preferences");
    assert_eq!(stored, None);
    let (prefs, has_session) = harness.with_vm(|vm| (vm.prefs().clone(), vm.session().is_some()));
    assert_eq!(prefs, Preferences::new(QuizMode::Flashcard, "Powitania i podstawy"));
    assert!(!has_session);
}

#[tokio::test(flavor = "current_thread")]
async fn packs_view_smoke_lists_builtin_packs() {
    let mut harness = setup_view_harness(ViewKind::Packs).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Powitania i podstawy"), "missing pack in {html}");
    assert!(html.contains("Liczby 0–10"), "missing pack in {html}");
    assert!(html.contains("11 entries"), "missing count in {html}");
    assert!(html.contains("Zwroty ważne"), "missing pack in {html}");
}

struct BrokenStore;

#[async_trait]
impl PreferencesRepository for BrokenStore {
    async fn get_raw(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Connection("disk I/O error".into()))
    }

    async fn put_raw(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("disk I/O error".into()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("disk I/O error".into()))
    }
}

/// Stalls the first write so a later one could overtake it.
struct SlowFirstWrite {
    inner: InMemoryRepository,
    writes: AtomicUsize,
}

#[async_trait]
impl PreferencesRepository for SlowFirstWrite {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_raw(key).await
    }

    async fn put_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.writes.fetch_add(1, Ordering::SeqCst) == 0 {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.inner.put_raw(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }
}

fn storage_with_preferences(preferences: Arc<dyn PreferencesRepository>) -> Storage {
    Storage {
        packs: Storage::in_memory().packs,
        preferences,
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reports_failed_preference_save() {
    let storage = storage_with_preferences(Arc::new(BrokenStore));
    let mut harness = setup_view_harness_with_storage(ViewKind::Quiz, storage).await;
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Flashcards"), "defaults expected in {html}");

    harness.dispatch(QuizIntent::ModeChanged(QuizMode::Typing)).await;
    let html = harness.render();
    assert!(
        html.contains("Something went wrong. Please try again."),
        "missing save error in {html}"
    );
    let mode = harness.with_vm(|vm| vm.prefs().mode());
    assert_eq!(mode, QuizMode::Typing);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_keeps_latest_preferences_after_quick_changes() {
    let store = Arc::new(SlowFirstWrite {
        inner: InMemoryRepository::new(),
        writes: AtomicUsize::new(0),
    });
    let storage = storage_with_preferences(store.clone());
    let mut harness = setup_view_harness_with_storage(ViewKind::Quiz, storage).await;
    harness.rebuild();
    harness.drive_async().await;

    harness
        .dispatch_burst(vec![
            QuizIntent::ModeChanged(QuizMode::Typing),
            QuizIntent::PackChanged("Zwroty ważne".into()),
            QuizIntent::ModeChanged(QuizMode::Listening),
        ])
        .await;

    let stored = store
        .get_raw(PREFERENCES_KEY)
        .await
        .expect("read preferences")
        .expect("preferences saved");
    assert!(stored.contains(r#""mode":"listening""#), "stale record {stored}");
    assert!(stored.contains("Zwroty ważne"), "stale record {stored}");
}
