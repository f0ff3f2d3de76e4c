use serde::Serialize;
use serde_json::json;

/// URL scheme the PMTiles protocol handler answers for.
pub const PMTILES_SCHEME: &str = "pmtiles";

/// A vector source backed by a tile archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorSource {
    pub id: &'static str,
    pub url: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FillPaint {
    #[serde(rename = "fill-color")]
    pub fill_color: &'static str,
    #[serde(rename = "fill-outline-color")]
    pub fill_outline_color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillLayer {
    pub id: &'static str,
    pub source_layer: &'static str,
    pub paint: FillPaint,
}

/// One source plus the single fill layer drawn from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub source: VectorSource,
    pub layer: FillLayer,
}

pub const ELECTORAL_OVERLAY: Overlay = Overlay {
    source: VectorSource {
        id: "electoralCanada",
        url: "pmtiles://data/pmtiles/electoralCanada.pmtiles",
    },
    layer: FillLayer {
        id: "electoralCanada-fill",
        source_layer: "geojson",
        paint: FillPaint {
            fill_color: "lightgray",
            fill_outline_color: "black",
        },
    },
};

impl Overlay {
    /// Inline style document declaring exactly this source and layer.
    pub fn style_document(&self) -> serde_json::Value {
        json!({
            "version": 8,
            "sources": {
                self.source.id: {
                    "type": "vector",
                    "url": self.source.url,
                }
            },
            "layers": [{
                "id": self.layer.id,
                "type": "fill",
                "source": self.source.id,
                "source-layer": self.layer.source_layer,
                "paint": self.layer.paint,
            }]
        })
    }

    /// Schemes that must have a registered handler before the map is built.
    pub fn required_scheme(&self) -> Option<&'static str> {
        self.source.url.split_once("://").map(|(scheme, _)| scheme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_has_exactly_one_source_and_one_fill_layer_bound_to_it() {
        let style = ELECTORAL_OVERLAY.style_document();

        let sources = style["sources"].as_object().expect("sources object");
        assert_eq!(sources.len(), 1);
        let (source_id, source) = sources.iter().next().expect("one source");
        assert_eq!(source["type"], "vector");
        assert_eq!(
            source["url"],
            "pmtiles://data/pmtiles/electoralCanada.pmtiles"
        );

        let layers = style["layers"].as_array().expect("layers array");
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0]["type"], "fill");
        assert_eq!(layers[0]["source"], source_id.as_str());
        assert_eq!(layers[0]["source-layer"], "geojson");
    }

    #[test]
    fn fill_paint_uses_hyphenated_property_names() {
        let style = ELECTORAL_OVERLAY.style_document();
        assert_eq!(
            style["layers"][0]["paint"],
            json!({"fill-color": "lightgray", "fill-outline-color": "black"})
        );
    }

    #[test]
    fn style_version_is_eight() {
        assert_eq!(ELECTORAL_OVERLAY.style_document()["version"], 8);
    }

    #[test]
    fn electoral_source_requires_pmtiles_scheme() {
        assert_eq!(ELECTORAL_OVERLAY.required_scheme(), Some(PMTILES_SCHEME));
    }
}
