//! Host-provided state interface.
//!
//! Accounts namespace the address space; see [`crate::domain::accounts`] for
//! the accounts this core owns.

use crate::domain::StateAccessError;
use shared_types::{Address, Currency, FungibleAssetValue};

/// Read access to a state snapshot at a fixed height.
pub trait StateReader: Send + Sync {
    /// Raw value stored at `(account, address)`, if any.
    fn get_state(
        &self,
        account: &Address,
        address: &Address,
    ) -> Result<Option<Vec<u8>>, StateAccessError>;

    /// Balance of `address` in `currency`; zero when never credited.
    fn get_balance(
        &self,
        address: &Address,
        currency: &Currency,
    ) -> Result<FungibleAssetValue, StateAccessError>;
}

/// Write access used while applying a single host-ordered state transition.
pub trait StateWriter: StateReader {
    fn set_state(
        &mut self,
        account: &Address,
        address: &Address,
        value: Vec<u8>,
    ) -> Result<(), StateAccessError>;

    fn mint(
        &mut self,
        recipient: &Address,
        value: &FungibleAssetValue,
    ) -> Result<(), StateAccessError>;

    fn burn(&mut self, owner: &Address, value: &FungibleAssetValue)
        -> Result<(), StateAccessError>;

    /// Move `value` from `sender` to `recipient`. Fails without side effects
    /// when the sender's balance is insufficient.
    fn transfer(
        &mut self,
        sender: &Address,
        recipient: &Address,
        value: &FungibleAssetValue,
    ) -> Result<(), StateAccessError>;
}
