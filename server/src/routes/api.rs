use axum::Json;
use axum::extract::State;

use webmaps_shared::StyleEntry;
use webmaps_shared::style::catalog;

use crate::app::AppState;

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "styles": webmaps_shared::StyleId::ALL.len(),
        "public_dir_present": state.config.public_dir.is_dir(),
    }))
}

/// Style catalog in selector order.
pub async fn styles() -> Json<Vec<StyleEntry>> {
    Json(catalog())
}
