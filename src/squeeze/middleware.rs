use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{
        header::{self, HeaderMap, HeaderName, HeaderValue},
        response::Parts,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Duration;

use super::cache::{CacheKey, CachedBody};
use super::state::Squeeze;
use crate::error::SqueezeError;
use crate::policy::{select_encoding, select_minification, Encoding, ResourceType};

pub const X_SQUEEZE_CACHE: HeaderName = HeaderName::from_static("x-squeeze-cache");
pub const X_SQUEEZE_MINIFY: HeaderName = HeaderName::from_static("x-squeeze-minify");
pub const X_SQUEEZE_ENCODING: HeaderName = HeaderName::from_static("x-squeeze-encoding");
pub const X_SQUEEZE_MINIFY_DURATION: HeaderName =
    HeaderName::from_static("x-squeeze-minify-duration");
pub const X_SQUEEZE_COMPRESS_DURATION: HeaderName =
    HeaderName::from_static("x-squeeze-compress-duration");

/// Minifies and compresses responses according to the squeeze policy.
///
/// Install with `axum::middleware::from_fn_with_state(squeeze, squeeze_response)`.
/// Responses that are not 2xx, are already encoded, or carry a
/// `Content-Range` pass through untouched.
pub async fn squeeze_response(
    State(squeeze): State<Squeeze>,
    request: Request,
    next: Next,
) -> Response {
    let config = squeeze.config();
    let encoding = select_encoding(Some(request.headers()), config);
    let path = request.uri().path().to_owned();

    let mut response = next.run(request).await;
    if !is_squeezable(&response) {
        return response;
    }

    let mimetype = mimetype(response.headers());
    let minification = select_minification(mimetype, config);
    if config.compress {
        add_vary(response.headers_mut());
    }
    if encoding.is_none() && minification.is_none() {
        return response;
    }

    let resource_type = response
        .extensions()
        .get::<ResourceType>()
        .copied()
        .unwrap_or_default();
    let use_cache = resource_type == ResourceType::Static && config.cache_static;
    let key = CacheKey {
        path,
        encoding,
        minification,
    };

    let (parts, body) = response.into_parts();

    if use_cache {
        if let Some(cached) = squeeze.cache().get(&key) {
            log_outcome(&squeeze, &key, resource_type, cached.encoding, "hit");
            let mut response = finish(parts, cached.body, cached.encoding);
            if config.add_debug_headers {
                let headers = response.headers_mut();
                headers.insert(X_SQUEEZE_CACHE, HeaderValue::from_static("HIT"));
                if let Some(kind) = minification {
                    headers.insert(X_SQUEEZE_MINIFY, HeaderValue::from_static(kind.as_str()));
                }
                if let Some(encoding) = cached.encoding {
                    headers.insert(X_SQUEEZE_ENCODING, HeaderValue::from_static(encoding.as_str()));
                }
            }
            return response;
        }
    }

    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let err = SqueezeError::from(e);
            tracing::error!(path = %key.path, error = %err, "Failed to buffer response body");
            return err.into_response();
        }
    };

    let squeezed = squeeze.process(bytes, encoding, minification, resource_type);

    if use_cache {
        squeeze.cache().insert(
            key.clone(),
            CachedBody {
                body: squeezed.body.clone(),
                encoding: squeezed.encoding,
            },
        );
    }
    log_outcome(&squeeze, &key, resource_type, squeezed.encoding, "miss");

    let mut response = finish(parts, squeezed.body, squeezed.encoding);
    if config.add_debug_headers {
        let headers = response.headers_mut();
        if use_cache {
            headers.insert(X_SQUEEZE_CACHE, HeaderValue::from_static("MISS"));
        }
        if let Some(kind) = minification {
            headers.insert(X_SQUEEZE_MINIFY, HeaderValue::from_static(kind.as_str()));
        }
        if let Some(encoding) = squeezed.encoding {
            headers.insert(X_SQUEEZE_ENCODING, HeaderValue::from_static(encoding.as_str()));
        }
        insert_duration(headers, X_SQUEEZE_MINIFY_DURATION, squeezed.minify_duration);
        insert_duration(headers, X_SQUEEZE_COMPRESS_DURATION, squeezed.compress_duration);
    }
    response
}

fn is_squeezable(response: &Response) -> bool {
    let headers = response.headers();
    response.status().is_success()
        && !headers.contains_key(header::CONTENT_ENCODING)
        && !headers.contains_key(header::CONTENT_RANGE)
}

/// The `Content-Type` without parameters, e.g. `text/html` for
/// `text/html; charset=utf-8`. Case is left as sent.
fn mimetype(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.split(';').next().unwrap_or("").trim())
        .filter(|ct| !ct.is_empty())
}

fn add_vary(headers: &mut HeaderMap) {
    let already_varies = headers
        .get_all(header::VARY)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .any(|v| {
            let v = v.trim();
            v == "*" || v.eq_ignore_ascii_case("accept-encoding")
        });
    if !already_varies {
        headers.append(header::VARY, HeaderValue::from_static("accept-encoding"));
    }
}

fn finish(mut parts: Parts, body: Bytes, encoding: Option<Encoding>) -> Response {
    parts.headers.remove(header::CONTENT_LENGTH);
    parts
        .headers
        .insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));
    if let Some(encoding) = encoding {
        parts
            .headers
            .insert(header::CONTENT_ENCODING, HeaderValue::from_static(encoding.as_str()));
        parts.headers.remove(header::ACCEPT_RANGES);
    }
    Response::from_parts(parts, Body::from(body))
}

fn insert_duration(headers: &mut HeaderMap, name: HeaderName, duration: Option<Duration>) {
    let Some(duration) = duration else {
        return;
    };
    let millis = format!("{:.3}", duration.as_secs_f64() * 1000.0);
    if let Ok(value) = HeaderValue::from_str(&millis) {
        headers.insert(name, value);
    }
}

fn log_outcome(
    squeeze: &Squeeze,
    key: &CacheKey,
    resource_type: ResourceType,
    applied: Option<Encoding>,
    cache: &'static str,
) {
    let encoding = applied.map(|e| e.as_str()).unwrap_or("identity");
    let minify = key.minification.map(|m| m.as_str()).unwrap_or("none");
    if squeeze.config().verbose_logging {
        tracing::info!(path = %key.path, ?resource_type, encoding, minify, cache, "Squeezed response");
    } else {
        tracing::debug!(path = %key.path, ?resource_type, encoding, minify, cache, "Squeezed response");
    }
}
