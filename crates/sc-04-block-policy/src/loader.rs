//! Policy configuration loading
//!
//! Configuration is stored in state as JSON. Parsed values are memoised by
//! content hash, so repeated loads of the same bytes share one parse.

use crate::config::BlockPolicyConfig;
use crate::domain::{ConfigResult, PolicyConfigError};
use sc_01_state_access::{CacheStats, ContentCache, StateReader, StateWriter, POLICY_ACCOUNT};
use shared_types::{derive_address, Address};
use std::sync::Arc;
use tracing::debug;

/// Slot of the JSON-encoded block policy configuration.
pub fn policy_config_address() -> Address {
    derive_address(b"block_policy_config", &[])
}

pub struct PolicyLoader {
    cache: ContentCache<BlockPolicyConfig>,
}

impl Default for PolicyLoader {
    fn default() -> Self {
        Self::new(ContentCache::default())
    }
}

impl PolicyLoader {
    pub fn new(cache: ContentCache<BlockPolicyConfig>) -> Self {
        Self { cache }
    }

    /// Parse and validate configuration bytes, reusing a cached parse of
    /// identical content.
    pub fn parse(&self, source: &[u8]) -> ConfigResult<Arc<BlockPolicyConfig>> {
        self.cache.get_or_parse(source, |bytes| -> ConfigResult<BlockPolicyConfig> {
            let config: BlockPolicyConfig =
                serde_json::from_slice(bytes).map_err(|e| PolicyConfigError::Parse(e.to_string()))?;
            config.validate()?;
            debug!(bytes = bytes.len(), "Block policy config parsed");
            Ok(config)
        })
    }

    /// The configuration recorded in state, or the default when none is.
    pub fn load<S>(&self, state: &S) -> ConfigResult<Arc<BlockPolicyConfig>>
    where
        S: StateReader + ?Sized,
    {
        match state.get_state(&POLICY_ACCOUNT, &policy_config_address())? {
            Some(bytes) => self.parse(&bytes),
            None => Ok(Arc::new(BlockPolicyConfig::default())),
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

/// Record `config` in state.
pub fn store_policy_config<S>(state: &mut S, config: &BlockPolicyConfig) -> ConfigResult<()>
where
    S: StateWriter + ?Sized,
{
    config.validate()?;
    let bytes = serde_json::to_vec(config).map_err(|e| PolicyConfigError::Parse(e.to_string()))?;
    state.set_state(&POLICY_ACCOUNT, &policy_config_address(), bytes)?;
    Ok(())
}
