use axum::{
    body::{Body, Bytes},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use std::io::Read;
use tower::ServiceExt;

use squeeze::{routes, Squeeze, SqueezeConfig};

const APP_JS: &str = include_str!("../assets/static/app.js");
const STYLE_CSS: &str = include_str!("../assets/static/style.css");
const INDEX_HTML: &str = include_str!("../assets/index.html");
const DATA_JSON: &str = include_str!("../assets/static/data.json");

fn app(config: SqueezeConfig) -> Router {
    routes::router(Squeeze::new(config))
}

fn debug_config() -> SqueezeConfig {
    SqueezeConfig {
        add_debug_headers: true,
        ..SqueezeConfig::default()
    }
}

/// Debug headers on and every body eligible for compression; minified
/// assets can drop below the default threshold.
fn compress_all_config() -> SqueezeConfig {
    SqueezeConfig {
        min_size: 0,
        ..debug_config()
    }
}

async fn get(app: Router, uri: &str, accept_encoding: Option<&str>) -> Response {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = accept_encoding {
        builder = builder.header(header::ACCEPT_ENCODING, value);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_bytes(response: Response) -> Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
}

fn unbrotli(data: &[u8]) -> String {
    let mut out = Vec::new();
    brotli::BrotliDecompress(&mut std::io::Cursor::new(data), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn test_browser_accept_encoding_gets_brotli() {
    let response = get(
        app(compress_all_config()),
        "/static/app.js",
        Some("gzip, deflate, br"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");
    assert_eq!(response.headers()["x-squeeze-minify"], "js");
    assert_eq!(response.headers()["x-squeeze-cache"], "MISS");

    let script = unbrotli(&body_bytes(response).await);
    assert!(script.len() < APP_JS.len());
    assert!(!script.contains("Fetches the active squeeze configuration"));
    assert!(script.contains("/api/config"));
}

#[tokio::test]
async fn test_deflate_beats_gzip() {
    let response = get(
        app(compress_all_config()),
        "/static/style.css",
        Some("gzip, deflate"),
    )
    .await;
    assert_eq!(response.headers()[header::CONTENT_ENCODING], "deflate");

    let mut css = String::new();
    flate2::read::DeflateDecoder::new(&body_bytes(response).await[..])
        .read_to_string(&mut css)
        .unwrap();
    assert!(css.len() < STYLE_CSS.len());
    assert!(!css.contains("Base layout"));
}

#[tokio::test]
async fn test_index_page_is_minified_and_compressed() {
    let response = get(app(compress_all_config()), "/", Some("br")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");
    assert_eq!(response.headers()["x-squeeze-minify"], "html");

    let html = unbrotli(&body_bytes(response).await);
    assert!(html.len() < INDEX_HTML.len());
    assert!(!html.contains("Page header"));
    assert!(html.contains("<h1>Squeeze</h1>"));
    assert!(html.contains("/static/app.js"));
}

#[tokio::test]
async fn test_compression_disabled_still_minifies() {
    let config = SqueezeConfig {
        compress: false,
        ..debug_config()
    };
    let response = get(app(config), "/static/data.json", Some("br")).await;

    assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
    assert!(response.headers().get(header::VARY).is_none());

    let body = body_bytes(response).await;
    assert!(body.len() < DATA_JSON.len());
    let original: serde_json::Value = serde_json::from_str(DATA_JSON).unwrap();
    let minified: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(original, minified);
}

#[tokio::test]
async fn test_minification_disabled_serves_original_bytes() {
    let config = SqueezeConfig {
        compress: false,
        minify_css: false,
        ..debug_config()
    };
    let response = get(app(config), "/static/style.css", Some("gzip")).await;

    assert!(response.headers().get("x-squeeze-minify").is_none());
    assert_eq!(body_bytes(response).await, STYLE_CSS.as_bytes());
}

#[tokio::test]
async fn test_small_dynamic_response_is_not_compressed() {
    let response = get(app(debug_config()), "/api/health", Some("gzip")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
    assert!(response.headers().get("x-squeeze-cache").is_none());

    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_dynamic_json_is_minified_and_compressed() {
    let response = get(app(compress_all_config()), "/api/config", Some("br")).await;

    assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");
    assert_eq!(response.headers()["x-squeeze-minify"], "js");

    let json = unbrotli(&body_bytes(response).await);
    assert!(!json.contains('\n'));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["min_size"], 0);
    assert_eq!(value["levels_static"]["brotli"], 11);
}

#[tokio::test]
async fn test_static_cache_is_per_encoding() {
    let app = app(compress_all_config());

    let first = get(app.clone(), "/static/app.js", Some("br")).await;
    assert_eq!(first.headers()["x-squeeze-cache"], "MISS");

    let second = get(app.clone(), "/static/app.js", Some("br")).await;
    assert_eq!(second.headers()["x-squeeze-cache"], "HIT");
    assert_eq!(second.headers()[header::CONTENT_ENCODING], "br");

    let gzip = get(app, "/static/app.js", Some("gzip")).await;
    assert_eq!(gzip.headers()["x-squeeze-cache"], "MISS");
    assert_eq!(gzip.headers()[header::CONTENT_ENCODING], "gzip");
}

#[tokio::test]
async fn test_cache_can_be_disabled() {
    let config = SqueezeConfig {
        cache_static: false,
        ..debug_config()
    };
    let squeeze = Squeeze::new(config);
    let app = routes::router(squeeze.clone());

    get(app.clone(), "/static/style.css", Some("br")).await;
    let response = get(app, "/static/style.css", Some("br")).await;

    assert!(response.headers().get("x-squeeze-cache").is_none());
    assert!(squeeze.cache().is_empty());
}

#[tokio::test]
async fn test_not_found_is_untouched() {
    let response = get(app(debug_config()), "/static/missing.js", Some("br")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
    assert_eq!(body_bytes(response).await, "Not Found".as_bytes());
}

#[tokio::test]
async fn test_unknown_routes_do_not_fill_the_cache() {
    let squeeze = Squeeze::new(debug_config());
    let app = routes::router(squeeze.clone());

    for uri in ["/dashboard", "/dashboard/settings", "/a/b/c"] {
        let response = get(app.clone(), uri, Some("br")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    assert!(squeeze.cache().is_empty());
}
