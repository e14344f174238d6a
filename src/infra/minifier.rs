//! Source minification infrastructure.
//!
//! JSON loses its insignificant whitespace, scripts are reprinted by the oxc
//! code generator, markup goes through minify-html and stylesheets through
//! lightningcss.

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;
use serde::de::IgnoredAny;

use crate::error::SqueezeError;
use crate::policy::MinificationKind;

/// Trait for source minification.
pub trait Minifier: Send + Sync {
    /// The kind of source this minifier handles.
    fn kind(&self) -> MinificationKind;

    /// Minifies the given source.
    fn minify(&self, source: &[u8]) -> Result<Vec<u8>, SqueezeError>;
}

/// JavaScript and JSON minifier.
///
/// Valid JSON only has whitespace outside string literals removed, so
/// numbers, key order and duplicate keys come out byte-for-byte. Anything
/// else is parsed as a module, then as a script, and printed back without
/// comments or whitespace. The syntax tree is not rewritten.
#[derive(Default)]
pub struct JsMinifier;

impl Minifier for JsMinifier {
    fn kind(&self) -> MinificationKind {
        MinificationKind::Js
    }

    fn minify(&self, source: &[u8]) -> Result<Vec<u8>, SqueezeError> {
        if serde_json::from_slice::<IgnoredAny>(source).is_ok() {
            return Ok(compact_json(source));
        }

        let script = std::str::from_utf8(source)
            .map_err(|e| SqueezeError::minification(self.kind(), e.to_string()))?;

        let allocator = Allocator::default();
        for source_type in [SourceType::mjs(), SourceType::cjs()] {
            let parsed = Parser::new(&allocator, script, source_type).parse();
            if parsed.panicked || !parsed.errors.is_empty() {
                continue;
            }
            let printed = Codegen::new()
                .with_options(CodegenOptions::minify())
                .build(&parsed.program);
            return Ok(printed.code.into_bytes());
        }

        Err(SqueezeError::minification(self.kind(), "failed to parse script"))
    }
}

/// Drops whitespace outside string literals. `source` must be valid JSON.
fn compact_json(source: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(source.len());
    let mut in_string = false;
    let mut escaped = false;
    for &byte in source {
        if in_string {
            out.push(byte);
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
        } else if !matches!(byte, b' ' | b'\t' | b'\n' | b'\r') {
            in_string = byte == b'"';
            out.push(byte);
        }
    }
    out
}

/// CSS minifier.
#[derive(Default)]
pub struct CssMinifier;

impl Minifier for CssMinifier {
    fn kind(&self) -> MinificationKind {
        MinificationKind::Css
    }

    fn minify(&self, source: &[u8]) -> Result<Vec<u8>, SqueezeError> {
        let css = std::str::from_utf8(source)
            .map_err(|e| SqueezeError::minification(self.kind(), e.to_string()))?;

        let mut stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| SqueezeError::minification(self.kind(), e.to_string()))?;
        stylesheet
            .minify(MinifyOptions::default())
            .map_err(|e| SqueezeError::minification(self.kind(), e.to_string()))?;

        let printer_options = PrinterOptions {
            minify: true,
            ..Default::default()
        };
        stylesheet
            .to_css(printer_options)
            .map(|result| result.code.into_bytes())
            .map_err(|e| SqueezeError::minification(self.kind(), e.to_string()))
    }
}

/// HTML minifier. Inline `<style>` is minified too; inline `<script>` is
/// left as written.
#[derive(Default)]
pub struct HtmlMinifier;

impl Minifier for HtmlMinifier {
    fn kind(&self) -> MinificationKind {
        MinificationKind::Html
    }

    fn minify(&self, source: &[u8]) -> Result<Vec<u8>, SqueezeError> {
        let cfg = minify_html::Cfg {
            minify_css: true,
            ..minify_html::Cfg::default()
        };
        Ok(minify_html::minify(source, &cfg))
    }
}

/// Minifier that dispatches on [`MinificationKind`].
#[derive(Default)]
pub struct MultiMinifier {
    js: JsMinifier,
    css: CssMinifier,
    html: HtmlMinifier,
}

impl MultiMinifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn minify(&self, source: &[u8], kind: MinificationKind) -> Result<Vec<u8>, SqueezeError> {
        match kind {
            MinificationKind::Js => self.js.minify(source),
            MinificationKind::Css => self.css.minify(source),
            MinificationKind::Html => self.html.minify(source),
        }
    }
}
