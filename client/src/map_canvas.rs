use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use leptos::prelude::*;

use webmaps_shared::ViewportConfig;
use webmaps_shared::viewport::NavigationOptions;

use crate::maplibre::{self, Map};

thread_local! {
    // Engine handles are JS objects, so they live here rather than in
    // `on_cleanup` closures, which must be `Send`.
    static MOUNTED_MAPS: RefCell<HashMap<u64, Map>> = RefCell::new(HashMap::new());
    static NEXT_SLOT: Cell<u64> = const { Cell::new(1) };
}

/// Identifier for per-component browser state kept in thread-local slots.
pub(crate) fn next_slot() -> u64 {
    NEXT_SLOT.with(|next| {
        let slot = next.get();
        next.set(slot.wrapping_add(1));
        slot
    })
}

pub(crate) fn is_mounted(slot: u64) -> bool {
    MOUNTED_MAPS.with(|maps| maps.borrow().contains_key(&slot))
}

fn mount(
    slot: u64,
    container: &web_sys::HtmlElement,
    options: &webmaps_shared::MapOptions,
    navigation: Option<NavigationOptions>,
) {
    if is_mounted(slot) {
        return;
    }
    match maplibre::create_map(container, options, navigation) {
        Ok(map) => {
            MOUNTED_MAPS.with(|maps| {
                maps.borrow_mut().insert(slot, map);
            });
        }
        Err(e) => {
            web_sys::console::warn_2(&"Map construction failed:".into(), &e);
        }
    }
}

fn unmount(slot: u64) {
    let map = MOUNTED_MAPS.with(|maps| maps.borrow_mut().remove(&slot));
    if let Some(map) = map {
        map.remove();
    }
}

/// A MapLibre canvas with a fixed viewport and style. The engine map is
/// created once the container is in the DOM and removed with the component.
#[component]
pub fn MapCanvas(viewport: ViewportConfig, style_document: serde_json::Value) -> impl IntoView {
    let container = NodeRef::<leptos::html::Div>::new();
    let slot = next_slot();
    let options = viewport.map_options(style_document);
    let navigation = viewport.navigation;

    Effect::new(move || {
        let Some(el) = container.get() else {
            return;
        };
        mount(slot, &el, &options, navigation);
    });

    on_cleanup(move || unmount(slot));

    view! { <div node_ref=container style=viewport.frame_css() /> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_unique() {
        let a = next_slot();
        let b = next_slot();
        assert_ne!(a, b);
        assert!(!is_mounted(a));
    }
}
