//! # Validator Set Selector
//!
//! Ranks a registry snapshot into the active set for a height.
//!
//! ## Ordering
//!
//! Bonded stake descending, then address ascending. Validators with zero
//! bonded stake are left out (they stay registered). The result is truncated
//! to `max_validators`. Ranking is a total order, so the output does not
//! depend on the order of the snapshot.

use crate::config::ValidatorSetConfig;
use crate::domain::{Result, ValidatorSet, ValidatorWeight};
use sc_01_state_access::{LookupPool, StateReader};
use sc_02_delegation::{ValidatorRegistry, ValidatorStake};
use std::cmp::Reverse;
use tracing::info;

#[derive(Clone, Debug, Default)]
pub struct ValidatorSetSelector {
    config: ValidatorSetConfig,
}

impl ValidatorSetSelector {
    pub fn new(config: ValidatorSetConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ValidatorSetConfig {
        &self.config
    }

    /// Rank `snapshot` into the set for `height`. Pure.
    pub fn select(&self, height: u64, snapshot: &[ValidatorStake]) -> ValidatorSet {
        let mut ranked: Vec<ValidatorWeight> = snapshot
            .iter()
            .filter(|entry| entry.bonded > 0)
            .map(|entry| ValidatorWeight {
                address: entry.validator.address(),
                public_key: *entry.validator.public_key(),
                stake_weight: entry.bonded,
            })
            .collect();

        ranked.sort_by_key(|v| (Reverse(v.stake_weight), v.address));
        ranked.truncate(self.config.max_validators);
        ValidatorSet::new(height, ranked)
    }

    /// Snapshot the registry through `pool` and rank it. Reads only.
    pub fn select_from_state<S>(
        &self,
        state: &S,
        registry: &ValidatorRegistry,
        pool: &LookupPool,
        height: u64,
    ) -> Result<ValidatorSet>
    where
        S: StateReader + ?Sized,
    {
        let snapshot = registry.snapshot(state, pool)?;
        let set = self.select(height, &snapshot);
        info!(
            height,
            registered = snapshot.len(),
            active = set.len(),
            total_stake = set.total_stake,
            "Validator set computed"
        );
        Ok(set)
    }
}
