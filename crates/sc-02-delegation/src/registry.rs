//! # Validator Registry & Delegation Ledger
//!
//! Persists validators and delegations in chain state and keeps the
//! reconciliation invariant: for every validator, the sum of per-delegator
//! shares equals its aggregate `delegator_shares`.
//!
//! ## State Layout
//!
//! | Account              | Address                          | Value           |
//! |----------------------|----------------------------------|-----------------|
//! | `VALIDATOR_ACCOUNT`  | validator address                | `Validator`     |
//! | `DELEGATION_ACCOUNT` | `delegation_address(d, v)`       | `Delegation`    |
//! | `REGISTRY_ACCOUNT`   | `validator_index_address()`      | sorted `Vec<Address>` |
//!
//! Bonded principal is a token balance held by `bonded_pool_address(v)`.

use crate::config::StakingAssets;
use crate::domain::{
    bonded_pool_address, delegation_address, Delegation, ShareDelta, StakingError, StakingResult,
    Validator,
};
use sc_01_state_access::{
    load, store, LookupPool, StateReader, StateWriter, DELEGATION_ACCOUNT, REGISTRY_ACCOUNT,
    VALIDATOR_ACCOUNT,
};
use shared_types::{derive_address, format_address, Address, FungibleAssetValue};
use tracing::{debug, info};

/// Slot of the sorted validator index.
pub fn validator_index_address() -> Address {
    derive_address(b"validator_index", &[])
}

/// A validator together with its bonded pool balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorStake {
    pub validator: Validator,
    /// Raw consensus-token units held by the validator's bonded pool.
    pub bonded: u128,
}

/// The records one share change writes, computed against current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationUpdate {
    pub delegation: Delegation,
    /// The validator with its new aggregate.
    pub validator: Validator,
    pub delta: ShareDelta,
    /// The validator index with this validator added, when it is new.
    grown_index: Option<Vec<Address>>,
}

impl DelegationUpdate {
    /// Whether applying the update registers the validator.
    pub fn registers_validator(&self) -> bool {
        self.grown_index.is_some()
    }
}

/// State-backed validator registry and delegation ledger.
#[derive(Debug, Clone, Default)]
pub struct ValidatorRegistry {
    assets: StakingAssets,
}

impl ValidatorRegistry {
    pub fn new(assets: StakingAssets) -> Self {
        Self { assets }
    }

    pub fn assets(&self) -> &StakingAssets {
        &self.assets
    }

    /// Load a validator. Absent is `Ok(None)`; a present record that does not
    /// decode or violates an invariant is `StateLoadFailure`.
    pub fn get<S>(&self, state: &S, address: &Address) -> StakingResult<Option<Validator>>
    where
        S: StateReader + ?Sized,
    {
        let Some(validator) = load::<Validator, S>(state, &VALIDATOR_ACCOUNT, address)? else {
            return Ok(None);
        };
        if validator.address() != *address {
            return Err(StakingError::StateLoadFailure(format!(
                "validator slot {} holds {}",
                format_address(address),
                format_address(&validator.address())
            )));
        }
        validator.verify_integrity(&self.assets)?;
        Ok(Some(validator))
    }

    /// Load a validator that must exist.
    pub fn require<S>(&self, state: &S, address: &Address) -> StakingResult<Validator>
    where
        S: StateReader + ?Sized,
    {
        self.get(state, address)?
            .ok_or(StakingError::UnknownValidator(*address))
    }

    /// Persist a validator and make sure it is indexed.
    pub fn upsert<S>(&self, state: &mut S, validator: &Validator) -> StakingResult<()>
    where
        S: StateWriter + ?Sized,
    {
        validator.verify_integrity(&self.assets)?;
        let grown_index = self.grown_index(state, &validator.address())?;
        self.write_validator(state, validator, grown_index.as_deref())
    }

    /// The validator index with `address` inserted, or `None` when it is
    /// already indexed.
    fn grown_index<S>(&self, state: &S, address: &Address) -> StakingResult<Option<Vec<Address>>>
    where
        S: StateReader + ?Sized,
    {
        let mut index = self.validator_addresses(state)?;
        Ok(index.binary_search(address).err().map(|position| {
            index.insert(position, *address);
            index
        }))
    }

    /// Writes only; everything written was read and checked beforehand.
    fn write_validator<S>(
        &self,
        state: &mut S,
        validator: &Validator,
        grown_index: Option<&[Address]>,
    ) -> StakingResult<()>
    where
        S: StateWriter + ?Sized,
    {
        let address = validator.address();
        store(state, &VALIDATOR_ACCOUNT, &address, validator)?;
        if let Some(index) = grown_index {
            store(state, &REGISTRY_ACCOUNT, &validator_index_address(), &index)?;
            info!(
                validator = %format_address(&address),
                validators = index.len(),
                "Validator registered"
            );
        }
        Ok(())
    }

    /// Addresses of all registered validators, ascending.
    pub fn validator_addresses<S>(&self, state: &S) -> StakingResult<Vec<Address>>
    where
        S: StateReader + ?Sized,
    {
        let index = load::<Vec<Address>, S>(state, &REGISTRY_ACCOUNT, &validator_index_address())?;
        Ok(index.unwrap_or_default())
    }

    /// All registered validators in address order.
    pub fn validators<S>(&self, state: &S) -> StakingResult<Vec<Validator>>
    where
        S: StateReader + ?Sized,
    {
        self.validator_addresses(state)?
            .iter()
            .map(|address| self.require_indexed(state, address))
            .collect()
    }

    /// An indexed validator whose record is missing is corruption, not a
    /// caller error.
    fn require_indexed<S>(&self, state: &S, address: &Address) -> StakingResult<Validator>
    where
        S: StateReader + ?Sized,
    {
        self.get(state, address)?.ok_or_else(|| {
            StakingError::StateLoadFailure(format!(
                "indexed validator {} has no record",
                format_address(address)
            ))
        })
    }

    /// Shares `delegator` holds in `validator`; zero when never delegated.
    pub fn delegation<S>(
        &self,
        state: &S,
        delegator: &Address,
        validator: &Address,
    ) -> StakingResult<Delegation>
    where
        S: StateReader + ?Sized,
    {
        let slot = delegation_address(delegator, validator);
        match load::<Delegation, S>(state, &DELEGATION_ACCOUNT, &slot)? {
            None => Ok(Delegation::empty(*delegator, *validator)),
            Some(delegation) => {
                let expected = Delegation::empty(*delegator, *validator);
                if delegation.delegator != expected.delegator
                    || delegation.validator != expected.validator
                    || delegation.shares.currency != expected.shares.currency
                {
                    return Err(StakingError::StateLoadFailure(format!(
                        "delegation slot {} holds a foreign record",
                        format_address(&slot)
                    )));
                }
                Ok(delegation)
            }
        }
    }

    /// Adjust one delegation and the validator's aggregate together.
    ///
    /// Both new values are computed before either is written, so a failure
    /// leaves state untouched.
    pub fn record_delegation<S>(
        &self,
        state: &mut S,
        delegator: &Address,
        validator: &Address,
        delta: ShareDelta,
    ) -> StakingResult<Delegation>
    where
        S: StateWriter + ?Sized,
    {
        let current = self.require(state, validator)?;
        let update = self.plan_delegation(state, delegator, current, delta)?;
        self.apply_delegation(state, &update)?;
        Ok(update.delegation)
    }

    /// Compute the records a share change produces without writing them.
    ///
    /// `validator` may be one that is not stored yet; the update then also
    /// registers it. Every read the change depends on happens here.
    pub fn plan_delegation<S>(
        &self,
        state: &S,
        delegator: &Address,
        mut validator: Validator,
        delta: ShareDelta,
    ) -> StakingResult<DelegationUpdate>
    where
        S: StateReader + ?Sized,
    {
        validator.verify_integrity(&self.assets)?;
        let validator_address = validator.address();
        let mut delegation = self.delegation(state, delegator, &validator_address)?;
        let currency = validator.share_currency();

        let (delegation_raw, aggregate_raw) = match delta {
            ShareDelta::Increase(amount) => (
                delegation
                    .shares
                    .raw
                    .checked_add(amount)
                    .ok_or(StakingError::ArithmeticOverflow)?,
                validator
                    .delegator_shares()
                    .raw
                    .checked_add(amount)
                    .ok_or(StakingError::ArithmeticOverflow)?,
            ),
            ShareDelta::Decrease(amount) => {
                let balance = delegation.shares.raw;
                let delegation_raw =
                    balance
                        .checked_sub(amount)
                        .ok_or(StakingError::NegativeBalance {
                            delegator: *delegator,
                            validator: validator_address,
                            balance,
                            decrease: amount,
                        })?;
                let aggregate_raw = validator
                    .delegator_shares()
                    .raw
                    .checked_sub(amount)
                    .ok_or_else(|| {
                        StakingError::StateLoadFailure(format!(
                            "validator {} aggregate below a single delegation",
                            format_address(&validator_address)
                        ))
                    })?;
                (delegation_raw, aggregate_raw)
            }
        };

        delegation.shares = FungibleAssetValue::new(currency.clone(), delegation_raw);
        validator.set_delegator_shares(FungibleAssetValue::new(currency, aggregate_raw), &self.assets)?;
        let grown_index = self.grown_index(state, &validator_address)?;

        Ok(DelegationUpdate {
            delegation,
            validator,
            delta,
            grown_index,
        })
    }

    /// Write a planned update. Performs no reads.
    pub fn apply_delegation<S>(&self, state: &mut S, update: &DelegationUpdate) -> StakingResult<()>
    where
        S: StateWriter + ?Sized,
    {
        let delegation = &update.delegation;
        store(state, &DELEGATION_ACCOUNT, &delegation.address(), delegation)?;
        self.write_validator(state, &update.validator, update.grown_index.as_deref())?;

        debug!(
            delegator = %format_address(&delegation.delegator),
            validator = %format_address(&delegation.validator),
            delta = ?update.delta,
            shares = delegation.shares.raw,
            total_shares = update.validator.delegator_shares().raw,
            "Delegation recorded"
        );
        Ok(())
    }

    /// Principal currently bonded to `validator`.
    pub fn bonded_pool_balance<S>(&self, state: &S, validator: &Address) -> StakingResult<FungibleAssetValue>
    where
        S: StateReader + ?Sized,
    {
        Ok(state.get_balance(&bonded_pool_address(validator), &self.assets.consensus_token)?)
    }

    /// Every registered validator with its bonded balance, in address order.
    ///
    /// Per-validator loads fan out through `pool`; the result and any error
    /// are those of a sequential scan.
    pub fn snapshot<S>(&self, state: &S, pool: &LookupPool) -> StakingResult<Vec<ValidatorStake>>
    where
        S: StateReader + ?Sized,
    {
        let addresses = self.validator_addresses(state)?;
        pool.fan_out(&addresses, |address| -> StakingResult<ValidatorStake> {
            let validator = self.require_indexed(state, address)?;
            let bonded = self.bonded_pool_balance(state, address)?.raw;
            Ok(ValidatorStake { validator, bonded })
        })
    }
}
