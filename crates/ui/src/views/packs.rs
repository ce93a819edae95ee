use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{PackCardVm, map_pack_cards};

#[component]
pub fn PacksView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let catalog = ctx.catalog();
    let preferences = ctx.preferences();
    let mut error = use_signal(|| None::<ViewError>);

    let resource = use_resource(move || {
        let catalog = catalog.clone();
        async move { Ok::<_, ViewError>(map_pack_cards(&catalog)) }
    });
    let state = view_state_from_resource(&resource);

    let on_practice = use_callback(move |name: String| {
        let preferences = preferences.clone();
        spawn(async move {
            let prefs = preferences.load().await.with_pack(name);
            match preferences.save(&prefs).await {
                Ok(()) => {
                    let _ = navigator.push(Route::Quiz {});
                }
                Err(err) => {
                    log::warn!("failed to save pack choice: {err}");
                    error.set(Some(ViewError::InvalidSelection));
                }
            }
        });
    });

    rsx! {
        div { class: "page packs-page",
            h2 { "Packs" }
            if let Some(err) = *error.read() {
                p { class: "quiz-error", role: "alert", "{err.message()}" }
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
                },
                ViewState::Ready(cards) => rsx! {
                    ul { class: "pack-list",
                        for card in cards {
                            PackCard { key: "{card.name}", card, on_practice }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn PackCard(card: PackCardVm, on_practice: EventHandler<String>) -> Element {
    let name = card.name.clone();
    rsx! {
        li { class: "pack-card",
            header { class: "pack-card__header",
                h3 { "{card.name}" }
                span { class: "pack-card__count", "{card.count_label}" }
            }
            ul { class: "pack-card__samples",
                for (source, target) in card.samples {
                    li { "{source} → {target}" }
                }
            }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| on_practice.call(name.clone()),
                "Practice"
            }
        }
    }
}
