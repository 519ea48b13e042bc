//! Block policy configuration
//!
//! Every tunable is a [`SubPolicy`] so limits can change at fixed heights.

use crate::domain::{ConfigResult, PolicyConfigError, SubPolicy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default byte limit for the transactions of one block.
pub const DEFAULT_MAX_TX_BYTES: u64 = 100 * 1024;

/// Default minimum number of transactions per block.
pub const DEFAULT_MIN_TX_PER_BLOCK: u64 = 0;

/// Default maximum number of transactions per block.
pub const DEFAULT_MAX_TX_PER_BLOCK: u64 = 100;

/// Default maximum number of transactions one signer may have in a block.
pub const DEFAULT_MAX_TX_PER_SIGNER_PER_BLOCK: u64 = 4;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockPolicyConfig {
    /// Total transaction bytes per block (default: 102400)
    pub max_tx_bytes: SubPolicy<u64>,

    /// Minimum transactions per block (default: 0)
    pub min_tx_per_block: SubPolicy<u64>,

    /// Maximum transactions per block (default: 100)
    pub max_tx_per_block: SubPolicy<u64>,

    /// Maximum transactions per signer per block (default: 4)
    pub max_tx_per_signer_per_block: SubPolicy<u64>,
}

impl Default for BlockPolicyConfig {
    fn default() -> Self {
        Self {
            max_tx_bytes: SubPolicy::new(DEFAULT_MAX_TX_BYTES),
            min_tx_per_block: SubPolicy::new(DEFAULT_MIN_TX_PER_BLOCK),
            max_tx_per_block: SubPolicy::new(DEFAULT_MAX_TX_PER_BLOCK),
            max_tx_per_signer_per_block: SubPolicy::new(DEFAULT_MAX_TX_PER_SIGNER_PER_BLOCK),
        }
    }
}

impl BlockPolicyConfig {
    /// Check that the count range is never empty.
    ///
    /// Both count policies are step functions, so checking index 0 and every
    /// threshold of either covers all heights.
    pub fn validate(&self) -> ConfigResult<()> {
        let indices: BTreeSet<u64> = std::iter::once(0)
            .chain(self.min_tx_per_block.threshold_indices())
            .chain(self.max_tx_per_block.threshold_indices())
            .collect();

        for index in indices {
            let min = *self.min_tx_per_block.value_at(index);
            let max = *self.max_tx_per_block.value_at(index);
            if min > max {
                return Err(PolicyConfigError::InvalidPolicyConfig(format!(
                    "min_tx_per_block {min} exceeds max_tx_per_block {max} at index {index}"
                )));
            }
        }
        Ok(())
    }
}
