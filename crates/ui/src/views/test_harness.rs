use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use drill_core::model::PackCatalog;
use drill_core::time::fixed_clock;
use services::{
    AppServices, PreferencesService, QuizService, QuizSettings, RecordingSpeech,
};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::quiz::QuizTestHandles;
use crate::views::{PacksView, QuizView};
use crate::vm::{QuizIntent, QuizVm};

const TEST_SEED: u64 = 7;

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn catalog(&self) -> Arc<PackCatalog> {
        self.services.catalog()
    }

    fn quiz(&self) -> Arc<QuizService> {
        self.services.quiz()
    }

    fn preferences(&self) -> Arc<PreferencesService> {
        self.services.preferences()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Quiz,
    Packs,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_handles: Option<QuizTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    if let Some(handles) = props.quiz_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Packs => rsx! { PacksView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub speech: Arc<RecordingSpeech>,
    pub quiz_handles: Option<QuizTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    /// Send `intent` through the quiz view's dispatcher.
    pub async fn dispatch(&mut self, intent: QuizIntent) {
        let handles = self.quiz_handles.clone().expect("quiz handles");
        self.dom.in_runtime(|| handles.dispatch().call(intent));
        drive_dom(&mut self.dom);
        self.drive_async().await;
    }

    /// Send several intents within one turn, then let the spawned work run.
    pub async fn dispatch_burst(&mut self, intents: Vec<QuizIntent>) {
        let handles = self.quiz_handles.clone().expect("quiz handles");
        self.dom.in_runtime(|| {
            for intent in intents {
                handles.dispatch().call(intent);
            }
        });
        drive_dom(&mut self.dom);
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    /// Read the quiz view model.
    pub fn with_vm<T>(&self, read: impl FnOnce(&QuizVm) -> T) -> T {
        let handles = self.quiz_handles.clone().expect("quiz handles");
        self.dom.in_runtime(|| {
            let vm = handles.vm();
            let guard = vm.read();
            read(guard.as_ref().expect("quiz vm loaded"))
        })
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_storage(view, Storage::in_memory()).await
}

pub async fn setup_view_harness_with_storage(view: ViewKind, storage: Storage) -> ViewHarness {
    let speech = Arc::new(RecordingSpeech::new());
    let settings = QuizSettings {
        seed: Some(TEST_SEED),
        ..QuizSettings::default()
    };
    let services = AppServices::from_storage(&storage, fixed_clock(), speech.clone(), settings)
        .await
        .expect("build services");

    let quiz_handles = match view {
        ViewKind::Quiz => Some(QuizTestHandles::default()),
        ViewKind::Packs => None,
    };

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { services }),
            view,
            quiz_handles: quiz_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        storage,
        speech,
        quiz_handles,
    }
}
