//! Content-negotiation policy.
//!
//! Two pure decision functions invoked once per outgoing response:
//! - [`select_encoding`] chooses the compression encoding from the request
//!   headers.
//! - [`select_minification`] chooses the minification pass from the response
//!   mimetype.
//!
//! Neither touches the body. Applying the decision is the job of
//! [`crate::squeeze`].

pub mod encoding;
pub mod flags;
pub mod minification;
pub mod types;

pub use encoding::select_encoding;
pub use flags::{
    ConfigFlags, SQUEEZE_COMPRESS, SQUEEZE_MINIFY_CSS, SQUEEZE_MINIFY_HTML, SQUEEZE_MINIFY_JS,
};
pub use minification::select_minification;
pub use types::{Encoding, MinificationKind, ResourceType};
