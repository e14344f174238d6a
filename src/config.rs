use serde::Serialize;
use std::env;

use crate::policy::{
    ConfigFlags, Encoding, ResourceType, SQUEEZE_COMPRESS, SQUEEZE_MINIFY_CSS,
    SQUEEZE_MINIFY_HTML, SQUEEZE_MINIFY_JS,
};

pub struct Config {
    pub port: u16,
    pub squeeze: SqueezeConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            squeeze: SqueezeConfig::from_env(),
        }
    }
}

/// Compression levels for one resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompressionLevels {
    pub gzip: u32,
    pub deflate: u32,
    pub brotli: u32,
}

impl CompressionLevels {
    pub fn for_encoding(&self, encoding: Encoding) -> u32 {
        match encoding {
            Encoding::Gzip => self.gzip,
            Encoding::Deflate => self.deflate,
            Encoding::Brotli => self.brotli,
        }
    }
}

/// Options read by the squeeze middleware.
#[derive(Debug, Clone, Serialize)]
pub struct SqueezeConfig {
    pub compress: bool,
    pub minify_js: bool,
    pub minify_css: bool,
    pub minify_html: bool,
    /// Bodies smaller than this many bytes are not compressed.
    pub min_size: usize,
    pub levels_static: CompressionLevels,
    pub levels_dynamic: CompressionLevels,
    pub cache_static: bool,
    pub add_debug_headers: bool,
    pub verbose_logging: bool,
}

impl Default for SqueezeConfig {
    fn default() -> Self {
        Self {
            compress: true,
            minify_js: true,
            minify_css: true,
            minify_html: true,
            min_size: 500,
            levels_static: CompressionLevels {
                gzip: 9,
                deflate: 9,
                brotli: 11,
            },
            levels_dynamic: CompressionLevels {
                gzip: 1,
                deflate: 1,
                brotli: 1,
            },
            cache_static: true,
            add_debug_headers: false,
            verbose_logging: false,
        }
    }
}

impl SqueezeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, falling back to the
    /// defaults for missing or unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            lookup(key)
                .and_then(|v| parse_bool(&v))
                .unwrap_or(default)
        };
        let number = |key: &str, default: usize| {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };
        let level = |key: &str, default: u32, max: u32| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u32>().ok())
                .map(|l| l.min(max))
                .unwrap_or(default)
        };

        Self {
            compress: flag(SQUEEZE_COMPRESS, defaults.compress),
            minify_js: flag(SQUEEZE_MINIFY_JS, defaults.minify_js),
            minify_css: flag(SQUEEZE_MINIFY_CSS, defaults.minify_css),
            minify_html: flag(SQUEEZE_MINIFY_HTML, defaults.minify_html),
            min_size: number("SQUEEZE_MIN_SIZE", defaults.min_size),
            levels_static: CompressionLevels {
                gzip: level("SQUEEZE_LEVEL_GZIP_STATIC", defaults.levels_static.gzip, 9),
                deflate: level("SQUEEZE_LEVEL_DEFLATE_STATIC", defaults.levels_static.deflate, 9),
                brotli: level("SQUEEZE_LEVEL_BROTLI_STATIC", defaults.levels_static.brotli, 11),
            },
            levels_dynamic: CompressionLevels {
                gzip: level("SQUEEZE_LEVEL_GZIP_DYNAMIC", defaults.levels_dynamic.gzip, 9),
                deflate: level("SQUEEZE_LEVEL_DEFLATE_DYNAMIC", defaults.levels_dynamic.deflate, 9),
                brotli: level("SQUEEZE_LEVEL_BROTLI_DYNAMIC", defaults.levels_dynamic.brotli, 11),
            },
            cache_static: flag("SQUEEZE_CACHE_STATIC", defaults.cache_static),
            add_debug_headers: flag("SQUEEZE_ADD_DEBUG_HEADERS", defaults.add_debug_headers),
            verbose_logging: flag("SQUEEZE_VERBOSE_LOGGING", defaults.verbose_logging),
        }
    }

    pub fn levels(&self, resource_type: ResourceType) -> &CompressionLevels {
        match resource_type {
            ResourceType::Static => &self.levels_static,
            ResourceType::Dynamic => &self.levels_dynamic,
        }
    }
}

impl ConfigFlags for SqueezeConfig {
    fn get_bool(&self, key: &str) -> bool {
        match key {
            SQUEEZE_COMPRESS => self.compress,
            SQUEEZE_MINIFY_JS => self.minify_js,
            SQUEEZE_MINIFY_CSS => self.minify_css,
            SQUEEZE_MINIFY_HTML => self.minify_html,
            _ => false,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
