use serde::Serialize;

/// Longitude/latitude pair, serialized as `[lng, lat]` the way the engine expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LngLat(pub f64, pub f64);

/// Geographic box `[west, south, east, north]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds(pub f64, pub f64, pub f64, pub f64);

impl Bounds {
    pub fn contains(&self, point: LngLat) -> bool {
        let Bounds(west, south, east, north) = *self;
        (west..=east).contains(&point.0) && (south..=north).contains(&point.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationOptions {
    pub show_compass: bool,
}

/// Fixed camera and interaction limits for one map section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    pub center: LngLat,
    pub zoom: f64,
    pub min_zoom: Option<f64>,
    pub max_zoom: Option<f64>,
    pub max_bounds: Option<Bounds>,
    pub render_world_copies: bool,
    pub attribution: bool,
    pub navigation: Option<NavigationOptions>,
    /// Height of the map frame in CSS pixels. Width is always 100%.
    pub height_px: u32,
}

/// Prince Edward Island, panning locked to the island.
pub const BASEMAP_VIEWPORT: ViewportConfig = ViewportConfig {
    center: LngLat(-63.1872, 46.4974),
    zoom: 7.25,
    min_zoom: Some(7.25),
    max_zoom: Some(12.0),
    max_bounds: Some(Bounds(-64.60505, 45.91017, -61.15594, 47.89282)),
    render_world_copies: true,
    attribution: false,
    navigation: Some(NavigationOptions {
        show_compass: false,
    }),
    height_px: 400,
};

/// All of Canada, no panning limits.
pub const ELECTORAL_VIEWPORT: ViewportConfig = ViewportConfig {
    center: LngLat(-94.35, 63.0),
    zoom: 2.5,
    min_zoom: None,
    max_zoom: None,
    max_bounds: None,
    render_world_copies: false,
    attribution: false,
    navigation: Some(NavigationOptions {
        show_compass: false,
    }),
    height_px: 600,
};

/// Constructor options for `maplibregl.Map`, minus the container element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub style: serde_json::Value,
    pub center: LngLat,
    pub zoom: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_zoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bounds: Option<Bounds>,
    pub render_world_copies: bool,
    pub attribution_control: bool,
}

impl ViewportConfig {
    pub fn map_options(&self, style: serde_json::Value) -> MapOptions {
        MapOptions {
            style,
            center: self.center,
            zoom: self.zoom,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            max_bounds: self.max_bounds,
            render_world_copies: self.render_world_copies,
            attribution_control: self.attribution,
        }
    }

    /// Inline CSS for the map frame and for the loading placeholder.
    pub fn frame_css(&self) -> String {
        format!(
            "width: 100%; height: {}px; border: 1px solid black;",
            self.height_px
        )
    }
}
