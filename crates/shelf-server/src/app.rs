//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `request_timeout` - Deadline for each request
pub(crate) fn create_router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    // Access-logged routes
    let logged = Router::new()
        .route("/", get(handlers::index::get_index))
        .route("/api/sections", get(handlers::sections::get_sections))
        .nest_service("/docs", ServeDir::new(&state.docs_root))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    // Probes hit /healthz constantly; keep them out of the access log
    Router::new()
        .route("/healthz", get(handlers::health::get_health))
        .merge(logged)
        .layer(
            ServiceBuilder::new()
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                )),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use axum::body::{Body, to_bytes};
    use axum::http::{HeaderMap, Request};
    use pretty_assertions::assert_eq;
    use shelf_site::{ScanError, Section, SectionSource, Site, SiteConfig};
    use tower::ServiceExt;

    use super::*;

    fn create_test_router(root: &Path) -> Router {
        let site = Arc::new(Site::from_root(root, SiteConfig::default()));
        let state = Arc::new(AppState {
            site,
            docs_root: root.to_path_buf(),
        });
        create_router(state, Duration::from_secs(5))
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, HeaderMap, String) {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8_lossy(&body).into_owned())
    }

    fn create_docs_tree() -> tempfile::TempDir {
        let temp_dir = tempfile::tempdir().unwrap();
        let hr = temp_dir.path().join("HR").join("2025");
        fs::create_dir_all(&hr).unwrap();
        fs::write(temp_dir.path().join("handbook.pdf"), "%PDF-handbook").unwrap();
        fs::write(hr.join("Leave policy.pdf"), "%PDF-leave").unwrap();
        fs::write(hr.join("README.md"), "# HR Section\n\n![logo](logo.png)\n").unwrap();
        temp_dir
    }

    #[tokio::test]
    async fn test_index_lists_sections() {
        let temp_dir = create_docs_tree();

        let (status, headers, body) = get(create_test_router(temp_dir.path()), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(
            headers[axum::http::header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        assert!(body.contains("<h2>General</h2>"));
        assert!(body.contains("<h2>HR/2025</h2>"));
        assert!(body.contains("<h1>HR Section</h1>"));
        assert!(body.contains("src=\"/docs/HR/2025/logo.png\""));
        assert!(body.contains("href=\"/docs/HR/2025/Leave%20policy.pdf\""));
        assert!(body.find("General").unwrap() < body.find("HR/2025").unwrap());
    }

    #[tokio::test]
    async fn test_index_missing_root_is_server_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("missing");

        let (status, _, body) = get(create_test_router(&missing), "/").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Could not load documents");
    }

    #[tokio::test]
    async fn test_api_sections_json() {
        let temp_dir = create_docs_tree();

        let (status, _, body) = get(create_test_router(temp_dir.path()), "/api/sections").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["sections"][0]["name"], "General");
        assert_eq!(json["sections"][0]["documents"][0]["url"], "/docs/handbook.pdf");
        assert_eq!(json["sections"][1]["name"], "HR/2025");
        assert_eq!(
            json["sections"][1]["documents"][0]["name"],
            "Leave policy.pdf"
        );
    }

    #[tokio::test]
    async fn test_docs_serves_file_bytes() {
        let temp_dir = create_docs_tree();
        let router = create_test_router(temp_dir.path());

        let (status, _, body) = get(router.clone(), "/docs/handbook.pdf").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "%PDF-handbook");

        let (status, _, body) = get(router, "/docs/HR/2025/Leave%20policy.pdf").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "%PDF-leave");
    }

    #[tokio::test]
    async fn test_docs_missing_file_is_not_found() {
        let temp_dir = create_docs_tree();

        let (status, _, _) = get(create_test_router(temp_dir.path()), "/docs/nope.pdf").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_healthz_ok() {
        let temp_dir = tempfile::tempdir().unwrap();

        let (status, _, body) = get(create_test_router(temp_dir.path()), "/healthz").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_healthz_missing_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("does-not-exist");

        let (status, _, _) = get(create_test_router(&missing), "/healthz").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();

        let (status, _, _) = get(create_test_router(temp_dir.path()), "/favicon.ico").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_security_headers_on_every_response() {
        let temp_dir = tempfile::tempdir().unwrap();

        for uri in ["/", "/healthz", "/api/sections"] {
            let (_, headers, _) = get(create_test_router(temp_dir.path()), uri).await;
            assert!(headers.contains_key("content-security-policy"), "{uri}");
            assert_eq!(headers["x-content-type-options"], "nosniff", "{uri}");
            assert_eq!(headers["x-frame-options"], "DENY", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_external_readme_image_allowed_by_csp() {
        let temp_dir = tempfile::tempdir().unwrap();
        let hr = temp_dir.path().join("HR");
        fs::create_dir_all(&hr).unwrap();
        fs::write(hr.join("README.md"), "![chart](https://example.com/chart.png)\n").unwrap();

        let (status, headers, body) = get(create_test_router(temp_dir.path()), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("src=\"https://example.com/chart.png\""), "{body}");
        let csp = headers["content-security-policy"].to_str().unwrap();
        let img_src = csp
            .split(';')
            .map(str::trim)
            .find(|directive| directive.starts_with("img-src"))
            .unwrap();
        assert!(img_src.split_whitespace().any(|source| source == "https:"), "{csp}");
    }

    struct SlowSource {
        root: std::path::PathBuf,
        delay: Duration,
    }

    impl SectionSource for SlowSource {
        fn scan(&self) -> Result<Vec<Section>, ScanError> {
            std::thread::sleep(self.delay);
            Ok(Vec::new())
        }

        fn root(&self) -> &Path {
            &self.root
        }
    }

    #[tokio::test]
    async fn test_slow_scan_times_out() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = Arc::new(SlowSource {
            root: temp_dir.path().to_path_buf(),
            delay: Duration::from_millis(500),
        });
        let state = Arc::new(AppState {
            site: Arc::new(Site::new(source, Duration::from_secs(60))),
            docs_root: temp_dir.path().to_path_buf(),
        });
        let router = create_router(state, Duration::from_millis(50));

        let (status, headers, _) = get(router, "/").await;

        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(headers["x-frame-options"], "DENY");
    }
}
