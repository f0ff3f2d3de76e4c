use leptos::prelude::*;

use webmaps_shared::ProtocolRegistry;

use crate::basemap::BasemapSection;
use crate::electoral::ElectoralSection;
use crate::maplibre::PmtilesBackend;

pub(crate) const DOCUMENT_TITLE: &str = "Web Maps";

/// Custom URL scheme handlers shared by every map section on the page.
#[derive(Clone)]
pub(crate) struct MapProtocols(pub ProtocolRegistry<PmtilesBackend>);

fn set_document_title(title: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    document.set_title(title);
}

/// Root component. Both map sections mount on first render.
#[component]
pub fn App() -> impl IntoView {
    provide_context(MapProtocols(ProtocolRegistry::new(PmtilesBackend)));

    Effect::new(move || {
        set_document_title(DOCUMENT_TITLE);
    });

    view! {
        <main>
            <h1>"Web Maps: Open source & Serverless"</h1>
            <BasemapSection />
            <ElectoralSection />
        </main>
    }
}
