//! # Share Exchange
//!
//! Converts consensus-token principal into validator shares and back at each
//! validator's current exchange rate, and applies the resulting bond, unbond
//! and redelegate state transitions.
//!
//! ## Atomicity
//!
//! Every mutation reads everything it depends on and plans its share
//! bookkeeping before the first write. The only write that can fail on its own
//! account (the token transfer) then runs first, and the planned records are
//! written after it without further reads, so a failed operation leaves state
//! untouched.

use crate::config::StakingAssets;
use crate::domain::{
    bonded_pool_address, principal_to_return, share_currency, shares_to_issue, ShareDelta,
    StakingError, StakingResult, Validator,
};
use crate::registry::ValidatorRegistry;
use sc_01_state_access::{StateReader, StateWriter};
use shared_types::{format_address, Address, FungibleAssetValue, PublicKey};
use tracing::debug;

/// What a successful staking mutation did. Amounts are raw units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StakingEffect {
    Bonded {
        validator: Address,
        principal: u128,
        shares: u128,
        created: bool,
    },
    Unbonded {
        validator: Address,
        shares: u128,
        principal: u128,
    },
    Redelegated {
        src: Address,
        dst: Address,
        shares_redeemed: u128,
        shares_issued: u128,
        principal: u128,
    },
}

#[derive(Debug, Clone, Default)]
pub struct ShareExchange {
    registry: ValidatorRegistry,
}

impl ShareExchange {
    pub fn new(assets: StakingAssets) -> Self {
        Self {
            registry: ValidatorRegistry::new(assets),
        }
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    fn assets(&self) -> &StakingAssets {
        self.registry.assets()
    }

    fn ensure_consensus_token(&self, value: &FungibleAssetValue) -> StakingResult<()> {
        let expected = &self.assets().consensus_token;
        if value.currency != *expected {
            return Err(StakingError::CurrencyTypeMismatch {
                expected: expected.ticker.clone(),
                actual: value.currency.ticker.clone(),
            });
        }
        Ok(())
    }

    /// Shares that bonding `principal` to `validator` would issue now.
    ///
    /// An unregistered validator quotes at the 1:1 bootstrap rate.
    pub fn bond_tokens<S>(
        &self,
        state: &S,
        validator: &Address,
        principal: &FungibleAssetValue,
    ) -> StakingResult<FungibleAssetValue>
    where
        S: StateReader + ?Sized,
    {
        self.ensure_consensus_token(principal)?;
        if principal.is_zero() {
            return Err(StakingError::ZeroAmount);
        }

        let total_shares = self
            .registry
            .get(state, validator)?
            .map_or(0, |v| v.delegator_shares().raw);
        let pool = self.registry.bonded_pool_balance(state, validator)?.raw;

        let shares = shares_to_issue(principal.raw, total_shares, pool)?;
        if shares == 0 {
            return Err(StakingError::ZeroAmount);
        }
        Ok(share_currency(validator).raw(shares))
    }

    /// Principal that redeeming `shares` of `delegator` in `validator` would
    /// return now.
    pub fn unbond_shares<S>(
        &self,
        state: &S,
        delegator: &Address,
        validator: &Address,
        shares: &FungibleAssetValue,
    ) -> StakingResult<FungibleAssetValue>
    where
        S: StateReader + ?Sized,
    {
        let expected = share_currency(validator);
        if shares.currency != expected {
            return Err(StakingError::CurrencyTypeMismatch {
                expected: expected.ticker,
                actual: shares.currency.ticker.clone(),
            });
        }
        if shares.is_zero() {
            return Err(StakingError::ZeroAmount);
        }

        let total_shares = self.registry.require(state, validator)?.delegator_shares().raw;
        let held = self.registry.delegation(state, delegator, validator)?.shares.raw;
        if total_shares == 0 || shares.raw > held {
            return Err(StakingError::InsufficientShares {
                validator: *validator,
                requested: shares.raw,
                available: held,
            });
        }

        let pool = self.registry.bonded_pool_balance(state, validator)?.raw;
        let principal = principal_to_return(validator, shares.raw, total_shares, pool)?;
        Ok(self.assets().consensus_token.raw(principal))
    }

    /// Bond `principal` from `delegator` to the validator identified by
    /// `public_key`, registering the validator if unseen.
    pub fn bond<S>(
        &self,
        state: &mut S,
        delegator: &Address,
        public_key: &PublicKey,
        principal: &FungibleAssetValue,
    ) -> StakingResult<StakingEffect>
    where
        S: StateWriter + ?Sized,
    {
        let existing = self.registry.get(state, &public_key.address())?;
        let created = existing.is_none();
        let validator = existing.unwrap_or_else(|| Validator::new(*public_key));
        self.bond_into(state, delegator, validator, created, principal)
    }

    /// Bond `principal` from `delegator` to an existing validator.
    pub fn delegate<S>(
        &self,
        state: &mut S,
        delegator: &Address,
        validator: &Address,
        principal: &FungibleAssetValue,
    ) -> StakingResult<StakingEffect>
    where
        S: StateWriter + ?Sized,
    {
        let validator = self.registry.require(state, validator)?;
        self.bond_into(state, delegator, validator, false, principal)
    }

    fn bond_into<S>(
        &self,
        state: &mut S,
        delegator: &Address,
        validator: Validator,
        created: bool,
        principal: &FungibleAssetValue,
    ) -> StakingResult<StakingEffect>
    where
        S: StateWriter + ?Sized,
    {
        let address = validator.address();
        let shares = self.bond_tokens(state, &address, principal)?;
        let update = self.registry.plan_delegation(
            state,
            delegator,
            validator,
            ShareDelta::Increase(shares.raw),
        )?;

        state.transfer(delegator, &bonded_pool_address(&address), principal)?;
        self.registry.apply_delegation(state, &update)?;

        debug!(
            delegator = %format_address(delegator),
            validator = %format_address(&address),
            principal = principal.raw,
            shares = shares.raw,
            "Bonded"
        );
        Ok(StakingEffect::Bonded {
            validator: address,
            principal: principal.raw,
            shares: shares.raw,
            created,
        })
    }

    /// Redeem `shares` of `delegator` in `validator` for principal.
    pub fn unbond<S>(
        &self,
        state: &mut S,
        delegator: &Address,
        validator: &Address,
        shares: &FungibleAssetValue,
    ) -> StakingResult<StakingEffect>
    where
        S: StateWriter + ?Sized,
    {
        let principal = self.unbond_shares(state, delegator, validator, shares)?;
        let current = self.registry.require(state, validator)?;
        let update = self.registry.plan_delegation(
            state,
            delegator,
            current,
            ShareDelta::Decrease(shares.raw),
        )?;

        state.transfer(&bonded_pool_address(validator), delegator, &principal)?;
        self.registry.apply_delegation(state, &update)?;

        debug!(
            delegator = %format_address(delegator),
            validator = %format_address(validator),
            shares = shares.raw,
            principal = principal.raw,
            "Unbonded"
        );
        Ok(StakingEffect::Unbonded {
            validator: *validator,
            shares: shares.raw,
            principal: principal.raw,
        })
    }

    /// Move `shares` worth of principal from `src` to `dst` without it passing
    /// through the delegator's balance.
    pub fn redelegate<S>(
        &self,
        state: &mut S,
        delegator: &Address,
        src: &Address,
        dst: &Address,
        shares: &FungibleAssetValue,
    ) -> StakingResult<StakingEffect>
    where
        S: StateWriter + ?Sized,
    {
        if src == dst {
            return Err(StakingError::SelfRedelegation);
        }
        let principal = self.unbond_shares(state, delegator, src, shares)?;
        let source = self.registry.require(state, src)?;
        let target = self.registry.require(state, dst)?;
        // The destination pool is independent of the source, so quoting
        // before the transfer gives the post-transfer rate.
        let issued = self.bond_tokens(state, dst, &principal)?;
        let leave = self.registry.plan_delegation(
            state,
            delegator,
            source,
            ShareDelta::Decrease(shares.raw),
        )?;
        let join = self.registry.plan_delegation(
            state,
            delegator,
            target,
            ShareDelta::Increase(issued.raw),
        )?;

        state.transfer(&bonded_pool_address(src), &bonded_pool_address(dst), &principal)?;
        self.registry.apply_delegation(state, &leave)?;
        self.registry.apply_delegation(state, &join)?;

        debug!(
            delegator = %format_address(delegator),
            src = %format_address(src),
            dst = %format_address(dst),
            principal = principal.raw,
            "Redelegated"
        );
        Ok(StakingEffect::Redelegated {
            src: *src,
            dst: *dst,
            shares_redeemed: shares.raw,
            shares_issued: issued.raw,
            principal: principal.raw,
        })
    }
}
