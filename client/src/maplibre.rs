//! Bindings to the MapLibre GL JS and PMTiles globals loaded by `index.html`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use webmaps_shared::viewport::NavigationOptions;
use webmaps_shared::{MapOptions, ProtocolBackend};

#[wasm_bindgen(js_namespace = maplibregl)]
extern "C" {
    pub type Map;

    #[wasm_bindgen(constructor, catch)]
    fn new(options: &JsValue) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = addControl)]
    fn add_control(this: &Map, control: &NavigationControl) -> Map;

    #[wasm_bindgen(method)]
    pub fn remove(this: &Map);

    pub type NavigationControl;

    #[wasm_bindgen(constructor)]
    fn new(options: &JsValue) -> NavigationControl;

    #[wasm_bindgen(js_name = addProtocol)]
    fn add_protocol(scheme: &str, handler: &js_sys::Function);

    #[wasm_bindgen(js_name = removeProtocol)]
    fn remove_protocol(scheme: &str);
}

#[wasm_bindgen(js_namespace = pmtiles)]
extern "C" {
    type Protocol;

    #[wasm_bindgen(constructor)]
    fn new() -> Protocol;

    #[wasm_bindgen(method, getter)]
    fn tile(this: &Protocol) -> js_sys::Function;
}

/// Registers a fresh `pmtiles.Protocol` tile loader with the engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct PmtilesBackend;

impl ProtocolBackend for PmtilesBackend {
    fn register(&self, scheme: &str) {
        let protocol = Protocol::new();
        add_protocol(scheme, &protocol.tile());
        web_sys::console::info_1(&format!("registered {scheme}:// protocol").into());
    }

    fn deregister(&self, scheme: &str) {
        remove_protocol(scheme);
        web_sys::console::info_1(&format!("removed {scheme}:// protocol").into());
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    // Plain objects, not ES Maps: the engine walks style JSON with `for..in`.
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(JsValue::from)
}

/// Build a map inside `container` and attach its navigation control.
pub fn create_map(
    container: &web_sys::HtmlElement,
    options: &MapOptions,
    navigation: Option<NavigationOptions>,
) -> Result<Map, JsValue> {
    let js_options = to_js(options)?;
    js_sys::Reflect::set(&js_options, &JsValue::from_str("container"), container)?;
    let map = Map::new(&js_options)?;
    if let Some(navigation) = navigation {
        let control = NavigationControl::new(&to_js(&navigation)?);
        map.add_control(&control);
    }
    Ok(map)
}
