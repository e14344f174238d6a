use serde::Serialize;
use std::fmt;

/// HTTP content-encoding applied to a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Gzip,
    Deflate,
    #[serde(rename = "br")]
    Brotli,
}

impl Encoding {
    /// The token used in `Accept-Encoding` and `Content-Encoding`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Gzip => "gzip",
            Encoding::Deflate => "deflate",
            Encoding::Brotli => "br",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minification pass to run on a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MinificationKind {
    Js,
    Css,
    Html,
}

impl MinificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MinificationKind::Js => "js",
            MinificationKind::Css => "css",
            MinificationKind::Html => "html",
        }
    }
}

impl fmt::Display for MinificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a response came from.
///
/// Static responses are compressed with the slow, high-ratio levels and kept
/// in the static cache. Everything else is dynamic. Handlers mark their
/// responses by inserting this value into the response extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Static,
    #[default]
    Dynamic,
}
