use axum::http::{header::ACCEPT_ENCODING, HeaderMap};

use super::flags::{ConfigFlags, SQUEEZE_COMPRESS};
use super::types::Encoding;

/// Candidates in the order they are tried against `Accept-Encoding`.
const PRIORITY: [Encoding; 3] = [Encoding::Brotli, Encoding::Deflate, Encoding::Gzip];

/// Picks the compression encoding for a response.
///
/// Returns `None` when compression is disabled, when no request headers are
/// available, or when `Accept-Encoding` mentions none of the supported
/// encodings. Matching is a plain substring test on the lowercased header
/// value with a fixed priority of br, then deflate, then gzip; q-values and
/// token order are ignored.
pub fn select_encoding<F>(headers: Option<&HeaderMap>, flags: &F) -> Option<Encoding>
where
    F: ConfigFlags + ?Sized,
{
    if !flags.get_bool(SQUEEZE_COMPRESS) {
        return None;
    }
    let headers = headers?;

    let accepted = headers
        .get(ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_lowercase();

    PRIORITY
        .into_iter()
        .find(|encoding| accepted.contains(encoding.as_str()))
}
