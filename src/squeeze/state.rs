use axum::body::Bytes;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::cache::StaticCache;
use crate::config::SqueezeConfig;
use crate::infra::{MultiCompressor, MultiMinifier};
use crate::policy::{Encoding, MinificationKind, ResourceType};

/// Shared state of the squeeze middleware.
///
/// Cheap to clone; every clone shares the same codecs and static cache.
#[derive(Clone)]
pub struct Squeeze {
    config: Arc<SqueezeConfig>,
    compressor: Arc<MultiCompressor>,
    minifier: Arc<MultiMinifier>,
    cache: Arc<StaticCache>,
}

/// Result of running a body through minification and compression.
#[derive(Debug)]
pub struct Squeezed {
    pub body: Bytes,
    /// Encoding actually applied to `body`.
    pub encoding: Option<Encoding>,
    pub minify_duration: Option<Duration>,
    pub compress_duration: Option<Duration>,
}

impl Squeeze {
    pub fn new(config: SqueezeConfig) -> Self {
        Self {
            config: Arc::new(config),
            compressor: Arc::new(MultiCompressor::new()),
            minifier: Arc::new(MultiMinifier::new()),
            cache: Arc::new(StaticCache::new()),
        }
    }

    pub fn config(&self) -> &SqueezeConfig {
        &self.config
    }

    pub fn cache(&self) -> &StaticCache {
        &self.cache
    }

    /// Minifies, then compresses, a buffered body.
    ///
    /// A stage that fails is skipped and the body from the previous stage is
    /// kept. Compression only runs when the minified body is at least
    /// `min_size` bytes, using the levels configured for `resource_type`.
    pub fn process(
        &self,
        body: Bytes,
        encoding: Option<Encoding>,
        minification: Option<MinificationKind>,
        resource_type: ResourceType,
    ) -> Squeezed {
        let mut body = body;

        let mut minify_duration = None;
        if let Some(kind) = minification {
            let start = Instant::now();
            match self.minifier.minify(&body, kind) {
                Ok(minified) => body = Bytes::from(minified),
                Err(e) => tracing::warn!(error = %e, "Minification skipped"),
            }
            minify_duration = Some(start.elapsed());
        }

        let mut applied = None;
        let mut compress_duration = None;
        if let Some(encoding) = encoding.filter(|_| body.len() >= self.config.min_size) {
            let level = self.config.levels(resource_type).for_encoding(encoding);
            let start = Instant::now();
            match self.compressor.compress(&body, encoding, level) {
                Ok(compressed) => {
                    body = Bytes::from(compressed);
                    applied = Some(encoding);
                }
                Err(e) => tracing::warn!(error = %e, "Compression skipped"),
            }
            compress_duration = Some(start.elapsed());
        }

        Squeezed {
            body,
            encoding: applied,
            minify_duration,
            compress_duration,
        }
    }
}
