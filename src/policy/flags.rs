//! Boolean configuration lookup used by the selectors.

use std::collections::HashMap;

pub const SQUEEZE_COMPRESS: &str = "SQUEEZE_COMPRESS";
pub const SQUEEZE_MINIFY_JS: &str = "SQUEEZE_MINIFY_JS";
pub const SQUEEZE_MINIFY_CSS: &str = "SQUEEZE_MINIFY_CSS";
pub const SQUEEZE_MINIFY_HTML: &str = "SQUEEZE_MINIFY_HTML";

/// Read-only view over boolean configuration options.
///
/// Unknown or missing keys read as `false`.
pub trait ConfigFlags {
    fn get_bool(&self, key: &str) -> bool;
}

impl ConfigFlags for HashMap<String, bool> {
    fn get_bool(&self, key: &str) -> bool {
        self.get(key).copied().unwrap_or(false)
    }
}

impl ConfigFlags for HashMap<&str, bool> {
    fn get_bool(&self, key: &str) -> bool {
        self.get(key).copied().unwrap_or(false)
    }
}
