use crate::domain::StateAccessError;
use crate::ports::{StateReader, StateWriter};
use shared_types::{Address, Currency, FungibleAssetValue};
use std::collections::HashMap;

/// In-memory implementation of the state interface for tests and embedders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryState {
    values: HashMap<(Address, Address), Vec<u8>>,
    balances: HashMap<(Address, Currency), u128>,
}

impl InMemoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all balances in `currency`.
    pub fn total_supply(&self, currency: &Currency) -> u128 {
        self.balances
            .iter()
            .filter(|((_, c), _)| c == currency)
            .map(|(_, raw)| *raw)
            .sum()
    }

    /// Number of stored state values.
    pub fn state_count(&self) -> usize {
        self.values.len()
    }

    fn balance_raw(&self, address: &Address, currency: &Currency) -> u128 {
        self.balances
            .get(&(*address, currency.clone()))
            .copied()
            .unwrap_or(0)
    }
}

impl StateReader for InMemoryState {
    fn get_state(
        &self,
        account: &Address,
        address: &Address,
    ) -> Result<Option<Vec<u8>>, StateAccessError> {
        Ok(self.values.get(&(*account, *address)).cloned())
    }

    fn get_balance(
        &self,
        address: &Address,
        currency: &Currency,
    ) -> Result<FungibleAssetValue, StateAccessError> {
        Ok(currency.raw(self.balance_raw(address, currency)))
    }
}

impl StateWriter for InMemoryState {
    fn set_state(
        &mut self,
        account: &Address,
        address: &Address,
        value: Vec<u8>,
    ) -> Result<(), StateAccessError> {
        self.values.insert((*account, *address), value);
        Ok(())
    }

    fn mint(
        &mut self,
        recipient: &Address,
        value: &FungibleAssetValue,
    ) -> Result<(), StateAccessError> {
        let current = self.get_balance(recipient, &value.currency)?;
        let updated = current.checked_add(value)?;
        self.balances
            .insert((*recipient, value.currency.clone()), updated.raw);
        Ok(())
    }

    fn burn(
        &mut self,
        owner: &Address,
        value: &FungibleAssetValue,
    ) -> Result<(), StateAccessError> {
        let available = self.balance_raw(owner, &value.currency);
        if available < value.raw {
            return Err(StateAccessError::InsufficientBalance {
                address: *owner,
                required: value.raw,
                available,
            });
        }
        self.balances
            .insert((*owner, value.currency.clone()), available - value.raw);
        Ok(())
    }

    fn transfer(
        &mut self,
        sender: &Address,
        recipient: &Address,
        value: &FungibleAssetValue,
    ) -> Result<(), StateAccessError> {
        let available = self.balance_raw(sender, &value.currency);
        if available < value.raw {
            return Err(StateAccessError::InsufficientBalance {
                address: *sender,
                required: value.raw,
                available,
            });
        }
        if sender == recipient {
            return Ok(());
        }

        let credited = self
            .get_balance(recipient, &value.currency)?
            .checked_add(value)?;
        self.balances
            .insert((*sender, value.currency.clone()), available - value.raw);
        self.balances
            .insert((*recipient, value.currency.clone()), credited.raw);
        Ok(())
    }
}
