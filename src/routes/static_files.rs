use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

use crate::policy::ResourceType;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

pub async fn serve_static(req: Request<Body>) -> impl IntoResponse {
    let path = req.uri().path().trim_start_matches('/');

    // Try to serve the exact path first
    if let Some(content) = Assets::get(path) {
        return response_from_asset(path, &content.data);
    }

    // Try index.html in directory
    let index_path = if path.is_empty() {
        "index.html".to_string()
    } else {
        format!("{}/index.html", path.trim_end_matches('/'))
    };
    if let Some(content) = Assets::get(&index_path) {
        return response_from_asset(&index_path, &content.data);
    }

    // Try with .html extension
    let html_path = format!("{}.html", path);
    if let Some(content) = Assets::get(&html_path) {
        return response_from_asset(&html_path, &content.data);
    }

    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

fn response_from_asset(path: &str, data: &[u8]) -> Response {
    let mime = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();

    let mut response = (
        [
            (header::CONTENT_TYPE, mime),
            (
                header::CACHE_CONTROL,
                "public, max-age=31536000, immutable".to_string(),
            ),
        ],
        data.to_vec(),
    )
        .into_response();
    response.extensions_mut().insert(ResourceType::Static);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_serves_embedded_asset_as_static() {
        let response = serve_static(get("/static/style.css")).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
        assert_eq!(
            response.extensions().get::<ResourceType>(),
            Some(&ResourceType::Static)
        );
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let response = serve_static(get("/")).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let response = serve_static(get("/static/missing.js")).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<ResourceType>().is_none());
    }
}
