//! Per-symbol quote cache.
//!
//! The cache is an explicit object handed to the enrichment service at
//! construction. Entries live for the process lifetime by default, with an
//! optional TTL policy for deployments that want expiry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{Enrichment, Symbol};

#[derive(Debug, Clone)]
struct CacheEntry {
    enrichment: Enrichment,
    inserted_at: Instant,
}

#[derive(Debug)]
struct CacheInner {
    map: HashMap<Symbol, CacheEntry>,
    ttl: Option<Duration>,
}

impl CacheInner {
    fn new(ttl: Option<Duration>) -> Self {
        Self {
            map: HashMap::new(),
            ttl,
        }
    }

    fn get(&self, symbol: &Symbol) -> Option<Enrichment> {
        self.map.get(symbol).and_then(|entry| match self.ttl {
            Some(ttl) if entry.inserted_at.elapsed() > ttl => None,
            _ => Some(entry.enrichment.clone()),
        })
    }

    fn put(&mut self, symbol: Symbol, enrichment: Enrichment) {
        self.map.insert(
            symbol,
            CacheEntry {
                enrichment,
                inserted_at: Instant::now(),
            },
        );
    }
}

/// Thread-safe symbol-to-enrichment cache shared across requests.
#[derive(Debug, Clone)]
pub struct QuoteCache {
    inner: Arc<tokio::sync::RwLock<CacheInner>>,
}

impl QuoteCache {
    /// Create a cache whose entries never expire.
    pub fn new() -> Self {
        Self::with_ttl(None)
    }

    /// Create a cache with an expiry policy.
    pub fn with_ttl(ttl: Option<Duration>) -> Self {
        Self {
            inner: Arc::new(tokio::sync::RwLock::new(CacheInner::new(ttl))),
        }
    }

    /// Get the cached enrichment for a symbol if present and not expired.
    pub async fn get(&self, symbol: &Symbol) -> Option<Enrichment> {
        let store = self.inner.read().await;
        store.get(symbol)
    }

    /// Put enrichment data for a symbol, replacing any previous entry.
    pub async fn put(&self, symbol: Symbol, enrichment: Enrichment) {
        let mut store = self.inner.write().await;
        store.put(symbol, enrichment);
    }

    /// Number of entries, counting expired ones not yet overwritten.
    pub async fn len(&self) -> usize {
        let store = self.inner.read().await;
        store.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop all entries.
    pub async fn clear(&self) {
        let mut store = self.inner.write().await;
        store.map.clear();
    }
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new()
    }
}
