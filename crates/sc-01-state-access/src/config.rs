//! Configuration for read fan-out and parse caching

use crate::domain::{LookupError, LookupPool, DEFAULT_CACHE_CAPACITY, DEFAULT_MAX_WORKERS};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LookupConfig {
    /// Worker threads for concurrent read-only lookups (default: 4)
    pub max_workers: usize,

    /// Parsed configuration entries kept by the content cache (default: 64)
    pub cache_capacity: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl LookupConfig {
    /// Build the lookup pool described by this configuration.
    pub fn build_pool(&self) -> Result<LookupPool, LookupError> {
        LookupPool::new(self.max_workers)
    }
}
