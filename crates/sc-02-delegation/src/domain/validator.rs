//! Validator domain entity
//!
//! A validator's aggregate `delegator_shares` is denominated in a currency
//! dedicated to that validator. Chain tokens never denominate shares; mixing
//! them is a type confusion caught at the setter.

use super::{StakingError, StakingResult};
use crate::config::StakingAssets;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Currency, FungibleAssetValue, PublicKey};

/// Decimal places of every share currency.
pub const SHARE_DECIMAL_PLACES: u8 = 18;

/// The share currency dedicated to `validator`.
pub fn share_currency(validator: &Address) -> Currency {
    Currency::new(
        format!("DELEGATION_SHARE_{}", hex::encode(validator)),
        SHARE_DECIMAL_PLACES,
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    address: Address,
    public_key: PublicKey,
    delegator_shares: FungibleAssetValue,
}

impl Validator {
    /// A fresh validator with no shares issued.
    pub fn new(public_key: PublicKey) -> Self {
        let address = public_key.address();
        Self {
            address,
            public_key,
            delegator_shares: share_currency(&address).zero(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Total shares issued against this validator's bonded pool.
    pub fn delegator_shares(&self) -> &FungibleAssetValue {
        &self.delegator_shares
    }

    pub fn share_currency(&self) -> Currency {
        share_currency(&self.address)
    }

    /// Replace the aggregate share amount.
    ///
    /// Fails with `CurrencyTypeMismatch` for the consensus or governance token
    /// and for any currency other than this validator's share currency.
    pub fn set_delegator_shares(
        &mut self,
        shares: FungibleAssetValue,
        assets: &StakingAssets,
    ) -> StakingResult<()> {
        let expected = self.share_currency();
        if assets.is_chain_token(&shares.currency) || shares.currency != expected {
            return Err(StakingError::CurrencyTypeMismatch {
                expected: expected.ticker,
                actual: shares.currency.ticker,
            });
        }
        self.delegator_shares = shares;
        Ok(())
    }

    /// Check the invariants a decoded value must satisfy.
    pub(crate) fn verify_integrity(&self, assets: &StakingAssets) -> StakingResult<()> {
        if self.public_key.address() != self.address {
            return Err(StakingError::StateLoadFailure(format!(
                "validator {} stored with a foreign public key",
                hex::encode(self.address)
            )));
        }
        let currency = &self.delegator_shares.currency;
        if assets.is_chain_token(currency) || *currency != self.share_currency() {
            return Err(StakingError::StateLoadFailure(format!(
                "validator {} stored with shares in {}",
                hex::encode(self.address),
                currency
            )));
        }
        Ok(())
    }
}
