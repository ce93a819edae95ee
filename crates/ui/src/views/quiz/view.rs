use std::sync::Arc;

use dioxus::document::eval;
use dioxus::prelude::*;

use drill_core::model::{Preferences, QuizMode};
use services::{Feedback, OptionMark, PreferencesService, RoundKind, RoundOption, RoundView};

use super::scripts::focus_script;
use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizEffect, QuizIntent, QuizVm, SummaryVm, map_summary, progress_label};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

fn focus_target(view: &RoundView) -> &'static str {
    if view.can_advance {
        return "quiz-next";
    }
    match view.kind {
        RoundKind::Flashcard { .. } => "quiz-reveal",
        RoundKind::Choice { .. } => "quiz-option-0",
        RoundKind::Typing => "quiz-typing",
    }
}

/// Preference write waiting for the writer task. Only the newest one is kept.
#[derive(Clone, Debug)]
enum PendingWrite {
    Save(Preferences),
    Reset,
}

#[derive(Clone, Copy)]
struct PreferenceWriter {
    pending: Signal<Option<PendingWrite>>,
    busy: Signal<bool>,
    error: Signal<Option<ViewError>>,
}

impl PreferenceWriter {
    fn queue(mut self, effect: QuizEffect, preferences: &Arc<PreferencesService>) {
        let write = match effect {
            QuizEffect::None => return,
            QuizEffect::SavePreferences(prefs) => PendingWrite::Save(prefs),
            QuizEffect::ResetPreferences => PendingWrite::Reset,
        };
        self.pending.set(Some(write));
        if *self.busy.peek() {
            return;
        }
        self.busy.set(true);
        let preferences = Arc::clone(preferences);
        spawn(async move {
            // Writes run one at a time so an older snapshot never lands last.
            while let Some(write) = self.pending.take() {
                let result = match write {
                    PendingWrite::Save(prefs) => preferences.save(&prefs).await,
                    PendingWrite::Reset => preferences.reset().await.map(|_| ()),
                };
                if let Err(err) = result {
                    log::warn!("failed to write preferences: {err}");
                    self.error.set(Some(ViewError::Unknown));
                }
            }
            self.busy.set(false);
        });
    }
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz();
    let preferences = ctx.preferences();
    let catalog = ctx.catalog();

    let error = use_signal(|| None::<ViewError>);
    let vm = use_signal(|| None::<QuizVm>);
    let typed = use_signal(String::new);
    let writer = PreferenceWriter {
        pending: use_signal(|| None),
        busy: use_signal(|| false),
        error,
    };

    let preferences_for_resource = preferences.clone();
    let resource = use_resource(move || {
        let preferences = preferences_for_resource.clone();
        let mut vm = vm;
        async move {
            let prefs = preferences.load().await;
            vm.set(Some(QuizVm::new(prefs)));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    let dispatch_intent = {
        let quiz = quiz.clone();
        let preferences = preferences.clone();
        use_callback(move |intent: QuizIntent| {
            let mut error = error;
            let mut vm = vm;
            let result = match vm.write().as_mut() {
                Some(current) => current.apply(intent, &quiz),
                None => Err(ViewError::Unknown),
            };
            match result {
                Ok(effect) => {
                    error.set(None);
                    writer.queue(effect, &preferences);
                }
                Err(err) => error.set(Some(err)),
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, vm);
            }
        }
    }

    use_effect(move || {
        let guard = vm.read();
        let target = match guard.as_ref() {
            Some(current) if current.summary().is_some() => Some("quiz-restart"),
            Some(current) => current.round_view().as_ref().map(focus_target),
            None => None,
        };
        if let Some(target) = target {
            let _ = eval(&focus_script(target));
        }
    });

    let on_key = use_callback(move |evt: KeyboardEvent| {
        let Some(view) = vm.read().as_ref().and_then(QuizVm::round_view) else {
            return;
        };
        let judged = view.feedback.is_some();
        if let (RoundKind::Choice { options }, Key::Character(value)) = (&view.kind, evt.key()) {
            if let Ok(shortcut) = value.parse::<usize>() {
                if !judged && (1..=options.len()).contains(&shortcut) {
                    evt.prevent_default();
                    dispatch_intent.call(QuizIntent::SelectOption(shortcut - 1));
                }
            }
            return;
        }
        if matches!(view.kind, RoundKind::Flashcard { revealed: None }) && evt.code() == Code::Space {
            evt.prevent_default();
            dispatch_intent.call(QuizIntent::Reveal);
            return;
        }
        if evt.key() == Key::Enter && view.can_advance && view.kind != RoundKind::Typing {
            evt.prevent_default();
            dispatch_intent.call(QuizIntent::Advance);
        }
    });

    let vm_guard = vm.read();
    let (mode, pack) = vm_guard.as_ref().map_or_else(
        || (QuizMode::Flashcard, catalog.first().name().to_owned()),
        |current| (current.prefs().mode(), current.prefs().pack().to_owned()),
    );
    let has_session = vm_guard.as_ref().is_some_and(|current| current.session().is_some());
    let round = vm_guard.as_ref().and_then(QuizVm::round_view);
    let summary = vm_guard.as_ref().and_then(QuizVm::summary).map(map_summary);
    let notice = vm_guard
        .as_ref()
        .and_then(QuizVm::notice)
        .map(|notice| notice.message());
    drop(vm_guard);
    let pack_names = catalog.names();
    let start_label = if has_session { "Restart" } else { "Start" };

    rsx! {
        div { class: "page quiz-page", id: "quiz-root", tabindex: "0", onkeydown: on_key,
            header { class: "quiz-toolbar",
                label { class: "quiz-field",
                    span { "Mode" }
                    select {
                        id: "quiz-mode",
                        value: "{mode.key()}",
                        onchange: move |evt: FormEvent| {
                            if let Ok(mode) = evt.value().parse::<QuizMode>() {
                                dispatch_intent.call(QuizIntent::ModeChanged(mode));
                            }
                        },
                        for option_mode in QuizMode::ALL {
                            option {
                                key: "{option_mode.key()}",
                                value: option_mode.key(),
                                selected: option_mode == mode,
                                "{option_mode.label()}"
                            }
                        }
                    }
                }
                label { class: "quiz-field",
                    span { "Pack" }
                    select {
                        id: "quiz-pack",
                        value: "{pack}",
                        onchange: move |evt: FormEvent| {
                            dispatch_intent.call(QuizIntent::PackChanged(evt.value()));
                        },
                        for name in pack_names {
                            option {
                                key: "{name}",
                                value: "{name}",
                                selected: name == pack,
                                "{name}"
                            }
                        }
                    }
                }
                button {
                    class: "btn btn-primary",
                    id: "quiz-start",
                    r#type: "button",
                    onclick: move |_| dispatch_intent.call(QuizIntent::Start),
                    "{start_label}"
                }
                button {
                    class: "btn btn-ghost",
                    id: "quiz-reset",
                    r#type: "button",
                    onclick: move |_| dispatch_intent.call(QuizIntent::ResetPreferences),
                    "Reset"
                }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(err) = *error.read() {
                        p { class: "quiz-error", role: "alert", "{err.message()}" }
                    }
                    if let Some(message) = notice {
                        p { class: "quiz-feedback quiz-feedback--correct", "{message}" }
                    }
                    if let Some(summary) = summary {
                        SummaryPanel { summary, on_intent: dispatch_intent }
                    } else if let Some(view) = round {
                        RoundPanel { view, typed, on_intent: dispatch_intent }
                    } else {
                        p { class: "quiz-empty", "Pick a mode and a pack, then press Start." }
                    }
                },
            }
        }
    }
}

#[component]
fn RoundPanel(view: RoundView, typed: Signal<String>, on_intent: EventHandler<QuizIntent>) -> Element {
    let progress = progress_label(&view);
    let judged = view.feedback.is_some();
    let next_label = if view.can_advance { "Next" } else { "Skip" };
    let next_class = if view.can_advance { "btn btn-primary" } else { "btn btn-ghost" };
    let speak_label = if view.mode == QuizMode::Listening { "Play again" } else { "Speak" };
    let RoundView {
        instruction,
        prompt,
        hint,
        kind,
        feedback,
        ..
    } = view;

    rsx! {
        section { class: "quiz-round", id: "quiz-round",
            p { class: "quiz-instruction", "{instruction}" }
            if let Some(prompt) = prompt {
                h2 { class: "quiz-prompt", id: "quiz-prompt", "{prompt}" }
            }
            if let Some(hint) = hint {
                p { class: "quiz-hint", "Hint: {hint}" }
            }
            match kind {
                RoundKind::Flashcard { revealed: Some(answer) } => rsx! {
                    p { class: "quiz-answer", id: "quiz-answer", "{answer}" }
                },
                RoundKind::Flashcard { revealed: None } => rsx! {
                    button {
                        class: "btn btn-secondary",
                        id: "quiz-reveal",
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::Reveal),
                        "Reveal"
                    }
                },
                RoundKind::Choice { options } => rsx! {
                    div { class: "quiz-options",
                        for (position, option) in options.into_iter().enumerate() {
                            OptionButton { key: "{position}", position, option, locked: judged, on_intent }
                        }
                    }
                },
                RoundKind::Typing => rsx! {
                    TypingForm { typed, locked: judged, on_intent }
                },
            }
            button {
                class: "btn btn-ghost",
                id: "quiz-speak",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::Speak),
                "{speak_label}"
            }
            match feedback {
                Some(Feedback::Correct) => rsx! {
                    p { class: "quiz-feedback quiz-feedback--correct", "Correct!" }
                },
                Some(Feedback::Incorrect { correct_text }) => rsx! {
                    p { class: "quiz-feedback quiz-feedback--wrong", "Not quite. The answer is “{correct_text}”." }
                },
                Some(Feedback::Revealed { .. }) | None => rsx! {},
            }
            div { class: "quiz-actions",
                button {
                    class: "{next_class}",
                    id: "quiz-next",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Advance),
                    "{next_label}"
                }
            }
            footer { class: "quiz-footer",
                span { id: "quiz-progress", "{progress}" }
            }
        }
    }
}

#[component]
fn OptionButton(
    position: usize,
    option: RoundOption,
    locked: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let class = match option.mark {
        OptionMark::Unmarked => "quiz-option",
        OptionMark::Wrong => "quiz-option quiz-option--wrong",
        OptionMark::Correct => "quiz-option quiz-option--correct",
    };
    let shortcut = position + 1;
    rsx! {
        button {
            class: "{class}",
            id: "quiz-option-{position}",
            r#type: "button",
            disabled: locked,
            onclick: move |_| on_intent.call(QuizIntent::SelectOption(position)),
            span { class: "quiz-option__key", "{shortcut}" }
            span { class: "quiz-option__label", "{option.label}" }
        }
    }
}

#[component]
fn TypingForm(typed: Signal<String>, locked: bool, on_intent: EventHandler<QuizIntent>) -> Element {
    let submit = use_callback(move |()| {
        let mut typed = typed;
        let answer = typed();
        typed.set(String::new());
        on_intent.call(QuizIntent::SubmitTyped(answer));
    });

    rsx! {
        div { class: "quiz-typing",
            input {
                id: "quiz-typing",
                r#type: "text",
                autocomplete: "off",
                spellcheck: "false",
                placeholder: "Your answer",
                disabled: locked,
                value: "{typed}",
                oninput: move |evt: FormEvent| {
                    let mut typed = typed;
                    typed.set(evt.value());
                },
                onkeydown: move |evt: KeyboardEvent| {
                    if evt.key() == Key::Enter {
                        evt.prevent_default();
                        submit.call(());
                    }
                },
            }
            button {
                class: "btn btn-primary",
                id: "quiz-submit",
                r#type: "button",
                disabled: locked,
                onclick: move |_| submit.call(()),
                "Check"
            }
        }
    }
}

#[component]
fn SummaryPanel(summary: SummaryVm, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        section { class: "quiz-summary", id: "quiz-summary",
            h2 { "Finished!" }
            p { class: "quiz-summary__context", "{summary.pack_name} · {summary.mode_label}" }
            if summary.scored {
                p { class: "quiz-summary__score", "Score: {summary.score_label} ({summary.accuracy_label})" }
            } else {
                p { class: "quiz-summary__score", "Cards reviewed: {summary.rounds}" }
            }
            button {
                class: "btn btn-primary",
                id: "quiz-restart",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::Start),
                "Play again"
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<QuizVm>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<Option<QuizVm>>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<QuizVm>> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
