use std::cell::RefCell;
use std::collections::HashMap;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::AbortController;

use webmaps_shared::{
    BASEMAP_VIEWPORT, FetchError, PMTILES_SCHEME, StyleError, StyleId, StyleLoad, StyleRequests,
};

use crate::app::MapProtocols;
use crate::map_canvas::{MapCanvas, next_slot};
use crate::style_fetch::fetch_style;

thread_local! {
    static IN_FLIGHT: RefCell<HashMap<u64, AbortController>> = RefCell::new(HashMap::new());
}

fn abort_in_flight(slot: u64) {
    let controller = IN_FLIGHT.with(|slots| slots.borrow_mut().remove(&slot));
    if let Some(controller) = controller {
        controller.abort();
    }
}

pub(crate) fn parse_selection(value: &str) -> Result<StyleId, StyleError> {
    value.parse()
}

pub(crate) fn failure_message(style: StyleId, err: &FetchError) -> String {
    format!("Could not load style {style}: {err}")
}

/// Basemap section: the style switcher above the map it controls.
#[component]
pub fn BasemapSection() -> impl IntoView {
    let style_choice = RwSignal::new(StyleId::default());

    view! {
        <section>
            <h2>"Basemap"</h2>
            <p>"Path: " <i>"client/src/basemap.rs"</i></p>
            <StyleSelect style_choice=style_choice />
            <BaseMap choice=style_choice.read_only() />
        </section>
    }
}

#[component]
fn StyleSelect(style_choice: RwSignal<StyleId>) -> impl IntoView {
    view! {
        <div style="margin: 1rem 0;">
            <label for="styles">"Choose a style:"</label>
            <select
                name="styles"
                id="styles"
                style="margin: 0 1rem 0 0.5rem;"
                prop:value=move || style_choice.get().key()
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    match parse_selection(&value) {
                        Ok(style) => style_choice.set(style),
                        Err(e) => web_sys::console::warn_1(&format!("{e}").into()),
                    }
                }
            >
                {StyleId::ALL
                    .into_iter()
                    .map(move |style| {
                        view! {
                            <option value=style.key() selected=move || style_choice.get() == style>
                                {style.key()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <a href=move || style_choice.get().path() target="_blank">
                "See style json"
            </a>
        </div>
    }
}

fn start_fetch(
    slot: u64,
    style: StyleId,
    requests: StoredValue<StyleRequests>,
    load: RwSignal<StyleLoad>,
) {
    let Some(ticket) = requests.try_update_value(|r| r.begin(style)) else {
        return;
    };

    abort_in_flight(slot);
    let controller = AbortController::new().ok();
    let signal = controller.as_ref().map(AbortController::signal);
    if let Some(controller) = controller {
        IN_FLIGHT.with(|slots| {
            slots.borrow_mut().insert(slot, controller);
        });
    }

    load.set(StyleLoad::Loading(style));

    spawn_local(async move {
        let result = fetch_style(style, signal.as_ref()).await;
        let Some(next) = requests
            .try_with_value(|r| r.complete(ticket, result))
            .flatten()
        else {
            web_sys::console::info_1(&format!("discarded stale style response for {style}").into());
            return;
        };

        IN_FLIGHT.with(|slots| {
            slots.borrow_mut().remove(&slot);
        });
        if let StyleLoad::Failed(style, err) = &next {
            web_sys::console::warn_1(&failure_message(*style, err).into());
        }
        let _ = load.try_set(next);
    });
}

/// Fetches the selected style and mounts a map with it. Shows a fixed-size
/// placeholder while the fetch is pending or after it failed.
#[component]
fn BaseMap(choice: ReadSignal<StyleId>) -> impl IntoView {
    let MapProtocols(registry) = expect_context();
    let lease = registry.acquire(PMTILES_SCHEME);
    on_cleanup(move || drop(lease));

    let load = RwSignal::new(StyleLoad::Loading(choice.get_untracked()));
    let requests = StoredValue::new(StyleRequests::default());
    let retry = RwSignal::new(0u32);
    let slot = next_slot();

    Effect::new(move || {
        retry.track();
        start_fetch(slot, choice.get(), requests, load);
    });

    on_cleanup(move || {
        let _ = requests.try_update_value(StyleRequests::invalidate);
        abort_in_flight(slot);
    });

    let frame_css = BASEMAP_VIEWPORT.frame_css();

    move || match load.get() {
        StyleLoad::Loading(_) => view! { <p style=frame_css.clone()>"Loading..."</p> }.into_any(),
        StyleLoad::Failed(style, err) => view! {
            <div style=frame_css.clone()>
                <p style="margin: 1rem;">{failure_message(style, &err)}</p>
                <button style="margin: 0 1rem;" on:click=move |_| retry.update(|n| *n += 1)>
                    "Retry"
                </button>
            </div>
        }
        .into_any(),
        StyleLoad::Ready(_, document) => {
            view! { <MapCanvas viewport=BASEMAP_VIEWPORT style_document=document.into_value() /> }
                .into_any()
        }
    }
}
