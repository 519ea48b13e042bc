//! Ranked validator set

use serde::{Deserialize, Serialize};
use shared_types::{Address, PublicKey};
use std::collections::HashMap;

/// One member of the active set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorWeight {
    pub address: Address,
    pub public_key: PublicKey,
    /// Bonded consensus-token balance, in raw units.
    pub stake_weight: u128,
}

/// The validators eligible for consensus at a height, in rank order.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "ValidatorSetParts")]
pub struct ValidatorSet {
    pub height: u64,
    pub validators: Vec<ValidatorWeight>,
    pub total_stake: u128,
    /// Quick lookup by address
    #[serde(skip)]
    lookup: HashMap<Address, usize>,
}

/// Wire shape; the total and the lookup are derived again on decode.
#[derive(Deserialize)]
struct ValidatorSetParts {
    height: u64,
    validators: Vec<ValidatorWeight>,
    #[serde(rename = "total_stake")]
    _total_stake: u128,
}

impl From<ValidatorSetParts> for ValidatorSet {
    fn from(parts: ValidatorSetParts) -> Self {
        Self::new(parts.height, parts.validators)
    }
}

impl ValidatorSet {
    /// Build a set from already-ranked validators.
    pub fn new(height: u64, validators: Vec<ValidatorWeight>) -> Self {
        let total_stake = validators
            .iter()
            .fold(0u128, |acc, v| acc.saturating_add(v.stake_weight));
        let lookup = validators
            .iter()
            .enumerate()
            .map(|(i, v)| (v.address, i))
            .collect();
        Self {
            height,
            validators,
            total_stake,
            lookup,
        }
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.lookup.contains_key(address)
    }

    pub fn get(&self, address: &Address) -> Option<&ValidatorWeight> {
        self.lookup.get(address).map(|&idx| &self.validators[idx])
    }

    /// Zero-based rank of a member.
    pub fn rank(&self, address: &Address) -> Option<usize> {
        self.lookup.get(address).copied()
    }

    pub fn addresses(&self) -> impl Iterator<Item = &Address> {
        self.validators.iter().map(|v| &v.address)
    }
}

impl PartialEq for ValidatorSet {
    fn eq(&self, other: &Self) -> bool {
        self.height == other.height
            && self.validators == other.validators
            && self.total_stake == other.total_stake
    }
}

impl Eq for ValidatorSet {}
