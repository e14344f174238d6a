//! Infrastructure layer providing the byte-level transformations.
//!
//! This module contains traits and implementations for:
//! - Content compression (gzip, deflate, brotli)
//! - Source minification (JS/JSON, CSS, HTML)
//!
//! The squeeze middleware only talks to [`MultiCompressor`] and
//! [`MultiMinifier`], so codecs can be swapped without touching it.

pub mod compressor;
pub mod minifier;

pub use compressor::{BrotliCompressor, Compressor, DeflateCompressor, GzipCompressor, MultiCompressor};
pub use minifier::{CssMinifier, HtmlMinifier, JsMinifier, Minifier, MultiMinifier};
