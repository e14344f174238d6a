use super::flags::{ConfigFlags, SQUEEZE_MINIFY_CSS, SQUEEZE_MINIFY_HTML, SQUEEZE_MINIFY_JS};
use super::types::MinificationKind;

/// Picks the minification pass for a response from its mimetype.
///
/// - `*javascript` or `*json` with `SQUEEZE_MINIFY_JS` -> [`MinificationKind::Js`]
/// - `*css` with `SQUEEZE_MINIFY_CSS` -> [`MinificationKind::Css`]
/// - `*html` with `SQUEEZE_MINIFY_HTML` -> [`MinificationKind::Html`]
///
/// Checks run in that order and the first match wins. Suffixes are compared
/// as-is, so `text/HTML` does not match.
pub fn select_minification<F>(mimetype: Option<&str>, flags: &F) -> Option<MinificationKind>
where
    F: ConfigFlags + ?Sized,
{
    let mimetype = mimetype?;

    let is_js_or_json = mimetype.ends_with("javascript") || mimetype.ends_with("json");
    if is_js_or_json && flags.get_bool(SQUEEZE_MINIFY_JS) {
        return Some(MinificationKind::Js);
    }
    if mimetype.ends_with("css") && flags.get_bool(SQUEEZE_MINIFY_CSS) {
        return Some(MinificationKind::Css);
    }
    if mimetype.ends_with("html") && flags.get_bool(SQUEEZE_MINIFY_HTML) {
        return Some(MinificationKind::Html);
    }
    None
}
