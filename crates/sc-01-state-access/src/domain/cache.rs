//! # Content-Addressed Parse Cache
//!
//! Memoises parsed configuration (policy tables and the like) keyed by the
//! SHA-256 of the source bytes.
//!
//! ## Coherence
//!
//! The key is the content itself, so an entry can never go stale: identical
//! bytes always parse to an identical value, and a hit returns exactly what a
//! cold parse would. Eviction is least-recently-used with a fixed capacity.
//!
//! Instances are constructed explicitly and injected where needed; there is no
//! process-wide cache.

use lru::LruCache;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use shared_types::Hash;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Default number of parsed entries kept.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Cache key for a source blob.
pub fn content_key(bytes: &[u8]) -> Hash {
    Sha256::digest(bytes).into()
}

/// Bounded LRU cache of parsed values keyed by source content.
pub struct ContentCache<T> {
    entries: Mutex<LruCache<Hash, Arc<T>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<T> ContentCache<T> {
    /// Create a cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(cap)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the parsed value for `source`, parsing on a miss.
    ///
    /// The lock is not held while parsing. Two threads missing on the same
    /// content both parse and store equal values.
    pub fn get_or_parse<E>(
        &self,
        source: &[u8],
        parse: impl FnOnce(&[u8]) -> Result<T, E>,
    ) -> Result<Arc<T>, E> {
        let key = content_key(source);

        if let Some(hit) = self.entries.lock().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(hit));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let parsed = Arc::new(parse(source)?);
        self.entries.lock().put(key, Arc::clone(&parsed));
        tracing::trace!(key = %hex_prefix(&key), "content cache miss");
        Ok(parsed)
    }

    /// Whether `source` is currently cached (does not touch recency).
    pub fn contains(&self, source: &[u8]) -> bool {
        self.entries.lock().contains(&content_key(source))
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock();
        CacheStats {
            entries: entries.len(),
            capacity: entries.cap().get(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<T> Default for ContentCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

fn hex_prefix(key: &Hash) -> String {
    key[..4].iter().map(|b| format!("{b:02x}")).collect()
}

/// Cache statistics for monitoring.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}
