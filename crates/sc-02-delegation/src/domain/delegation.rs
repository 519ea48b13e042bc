//! Delegation records and derived addresses

use super::share_currency;
use serde::{Deserialize, Serialize};
use shared_types::{derive_address, Address, FungibleAssetValue};

/// Slot of the delegation record for `(delegator, validator)`.
pub fn delegation_address(delegator: &Address, validator: &Address) -> Address {
    derive_address(b"delegation", &[delegator.as_slice(), validator.as_slice()])
}

/// Holder of the principal bonded to `validator`.
pub fn bonded_pool_address(validator: &Address) -> Address {
    derive_address(b"bonded_pool", &[validator.as_slice()])
}

/// Shares one delegator holds in one validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    pub delegator: Address,
    pub validator: Address,
    pub shares: FungibleAssetValue,
}

impl Delegation {
    /// An empty delegation; absent records read as this.
    pub fn empty(delegator: Address, validator: Address) -> Self {
        Self {
            delegator,
            validator,
            shares: share_currency(&validator).zero(),
        }
    }

    pub fn address(&self) -> Address {
        delegation_address(&self.delegator, &self.validator)
    }
}

/// Signed change to a delegation's share balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareDelta {
    Increase(u128),
    Decrease(u128),
}
