//! # Bounded Lookup Fan-Out
//!
//! Runs independent read-only lookups on a dedicated rayon pool with a fixed
//! worker count and joins them before returning.
//!
//! ## Determinism
//!
//! Results come back in input order. When several lookups fail, the error of
//! the first failing key in input order is returned, which is exactly what a
//! sequential loop would report.

use super::LookupError;
use rayon::prelude::*;

/// Default worker cap.
pub const DEFAULT_MAX_WORKERS: usize = 4;

/// Below this many keys the lookups run inline on the caller's thread.
pub const PARALLEL_THRESHOLD: usize = 4;

/// A fixed-size worker pool for read-only lookups.
pub struct LookupPool {
    pool: rayon::ThreadPool,
    max_workers: usize,
}

impl LookupPool {
    /// Build a pool with exactly `max_workers` threads.
    pub fn new(max_workers: usize) -> Result<Self, LookupError> {
        if max_workers == 0 {
            return Err(LookupError::ZeroWorkers);
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(max_workers)
            .thread_name(|i| format!("sc-lookup-{i}"))
            .build()
            .map_err(|e| LookupError::PoolBuild(e.to_string()))?;
        Ok(Self { pool, max_workers })
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Run `lookup` for every key and collect the results in key order.
    pub fn fan_out<K, V, E, F>(&self, keys: &[K], lookup: F) -> Result<Vec<V>, E>
    where
        K: Sync,
        V: Send,
        E: Send,
        F: Fn(&K) -> Result<V, E> + Sync,
    {
        if keys.len() < PARALLEL_THRESHOLD {
            return keys.iter().map(&lookup).collect();
        }

        let results: Vec<Result<V, E>> =
            self.pool.install(|| keys.par_iter().map(&lookup).collect());
        results.into_iter().collect()
    }
}
