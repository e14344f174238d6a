//! In-memory cache for squeezed static resources.

use axum::body::Bytes;
use dashmap::DashMap;

use crate::policy::{Encoding, MinificationKind};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub path: String,
    pub encoding: Option<Encoding>,
    pub minification: Option<MinificationKind>,
}

/// A finished body. `encoding` is the encoding actually applied, which is
/// `None` when the body was below the compression threshold.
#[derive(Debug, Clone)]
pub struct CachedBody {
    pub body: Bytes,
    pub encoding: Option<Encoding>,
}

#[derive(Debug, Default)]
pub struct StaticCache {
    entries: DashMap<CacheKey, CachedBody>,
}

impl StaticCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<CachedBody> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, key: CacheKey, body: CachedBody) {
        self.entries.insert(key, body);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
