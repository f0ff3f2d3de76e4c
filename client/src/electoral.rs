use leptos::prelude::*;

use webmaps_shared::{ELECTORAL_OVERLAY, ELECTORAL_VIEWPORT};

use crate::app::MapProtocols;
use crate::map_canvas::MapCanvas;

/// Electoral section: federal ridings drawn from a PMTiles archive.
#[component]
pub fn ElectoralSection() -> impl IntoView {
    view! {
        <section>
            <h2>"Electoral"</h2>
            <p>"Path: " <i>"client/src/electoral.rs"</i></p>
            <Electoral />
        </section>
    }
}

#[component]
fn Electoral() -> impl IntoView {
    // Taken in the component body so the scheme is registered before the
    // canvas below builds its map and resolves the archive URL.
    let MapProtocols(registry) = expect_context();
    let lease = ELECTORAL_OVERLAY
        .required_scheme()
        .map(|scheme| registry.acquire(scheme));
    on_cleanup(move || drop(lease));

    view! {
        <MapCanvas
            viewport=ELECTORAL_VIEWPORT
            style_document=ELECTORAL_OVERLAY.style_document()
        />
    }
}
