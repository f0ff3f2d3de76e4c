use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, header},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;

use crate::config::ServerConfig;
use crate::routes;

#[derive(Debug, Clone)]
pub(crate) struct AppState {
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub(crate) fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

pub(crate) fn build_app(state: AppState) -> Router {
    let public_dir = &state.config.public_dir;

    // Archives are read with byte-range requests; keep them out of the
    // compression layer so `Content-Range` offsets stay valid.
    let public_assets = Router::new()
        .nest_service(
            "/styles",
            ServeDir::new(public_dir.join("styles")).precompressed_gzip(),
        )
        .nest_service("/data", ServeDir::new(public_dir.join("data")))
        .layer(middleware::from_fn(set_static_cache_control));

    let static_assets = Router::new()
        .fallback_service(
            ServeDir::new(&state.config.static_dir)
                .precompressed_br()
                .precompressed_gzip(),
        )
        .layer(middleware::from_fn(set_static_cache_control));

    let api = Router::new()
        .route("/api/health", get(routes::api::health))
        .route("/api/styles", get(routes::api::styles))
        .layer(CompressionLayer::new());

    api.merge(public_assets)
        .fallback_service(static_assets)
        .with_state(state)
}

async fn set_static_cache_control(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    if response.status().is_success()
        && let Some(cache_control) = cache_control_for_path(&path)
    {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(cache_control),
        );
    }

    response
}

fn cache_control_for_path(path: &str) -> Option<&'static str> {
    if is_hashed_bundle_asset(path) {
        return Some("public, max-age=31536000, immutable");
    }

    if path.starts_with("/styles/") || path.starts_with("/data/") {
        return Some("public, max-age=86400");
    }

    None
}

fn is_hashed_bundle_asset(path: &str) -> bool {
    let Some(ext) = Path::new(path).extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    if !matches!(ext, "wasm" | "js" | "css") {
        return false;
    }

    let Some(filename) = Path::new(path).file_name().and_then(|name| name.to_str()) else {
        return false;
    };

    filename
        .split(['-', '_', '.'])
        .any(|segment| segment.len() >= 8 && segment.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;

    fn fixture_dirs(name: &str) -> (PathBuf, PathBuf) {
        let root = std::env::temp_dir().join(format!(
            "webmaps-server-{}-{name}",
            std::process::id()
        ));
        let public_dir = root.join("public");
        let static_dir = root.join("dist");
        std::fs::create_dir_all(public_dir.join("styles")).expect("styles dir");
        std::fs::create_dir_all(public_dir.join("data/pmtiles")).expect("data dir");
        std::fs::create_dir_all(&static_dir).expect("dist dir");
        std::fs::write(
            public_dir.join("styles/dark.json"),
            r#"{"version":8,"name":"dark","sources":{},"layers":[]}"#,
        )
        .expect("write style");
        std::fs::write(
            public_dir.join("data/pmtiles/electoralCanada.pmtiles"),
            b"PMTiles\x03archive-bytes-for-range-tests",
        )
        .expect("write archive");
        std::fs::write(static_dir.join("index.html"), "<div id=\"app\"></div>")
            .expect("write index");
        (public_dir, static_dir)
    }

    fn test_app(name: &str) -> Router {
        let (public_dir, static_dir) = fixture_dirs(name);
        build_app(AppState::new(ServerConfig {
            port: 0,
            static_dir,
            public_dir,
        }))
    }

    #[test]
    fn immutable_cache_for_hashed_bundle_assets() {
        assert_eq!(
            cache_control_for_path("/webmaps-client-71578f6b278221f3_bg.wasm"),
            Some("public, max-age=31536000, immutable")
        );
        assert_eq!(
            cache_control_for_path("/webmaps-client-71578f6b278221f3.js"),
            Some("public, max-age=31536000, immutable")
        );
    }

    #[test]
    fn day_cache_for_styles_and_archives() {
        assert_eq!(
            cache_control_for_path("/styles/dark.json"),
            Some("public, max-age=86400")
        );
        assert_eq!(
            cache_control_for_path("/data/pmtiles/electoralCanada.pmtiles"),
            Some("public, max-age=86400")
        );
    }

    #[test]
    fn no_cache_header_override_for_html() {
        assert_eq!(cache_control_for_path("/"), None);
        assert_eq!(cache_control_for_path("/index.html"), None);
    }

    #[tokio::test]
    async fn styles_endpoint_lists_catalog_in_order() {
        let response = test_app("styles-endpoint")
            .oneshot(Request::get("/api/styles").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let entries: Vec<serde_json::Value> = serde_json::from_slice(&body).expect("json");
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0]["id"], "black");
        assert_eq!(entries[2]["path"], "/styles/dark.json");
    }

    #[tokio::test]
    async fn style_document_is_served_verbatim_with_cache_header() {
        let response = test_app("style-document")
            .oneshot(
                Request::get("/styles/dark.json")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL),
            Some(&HeaderValue::from_static("public, max-age=86400"))
        );

        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        assert_eq!(
            &body[..],
            br#"{"version":8,"name":"dark","sources":{},"layers":[]}"#
        );
    }

    #[tokio::test]
    async fn archive_supports_byte_range_requests() {
        let response = test_app("archive-range")
            .oneshot(
                Request::get("/data/pmtiles/electoralCanada.pmtiles")
                    .header(header::RANGE, "bytes=0-6")
                    .header(header::ACCEPT_ENCODING, "gzip")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
        assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
        assert!(response.headers().contains_key(header::CONTENT_RANGE));

        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        assert_eq!(&body[..], b"PMTiles");
    }

    #[tokio::test]
    async fn unknown_style_is_not_found() {
        let response = test_app("missing-style")
            .oneshot(
                Request::get("/styles/sepia.json")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());
    }

    #[tokio::test]
    async fn health_reports_catalog_size_over_http() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        let app = test_app("health-http");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve test app");
        });

        let health: serde_json::Value = reqwest::get(format!("http://{addr}/api/health"))
            .await
            .expect("health request")
            .error_for_status()
            .expect("health status")
            .json()
            .await
            .expect("health json");
        assert_eq!(health["status"], "ok");
        assert_eq!(health["styles"], 6);
        assert_eq!(health["public_dir_present"], true);

        handle.abort();
    }
}
