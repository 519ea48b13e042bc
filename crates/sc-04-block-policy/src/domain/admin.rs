//! Admin state
//!
//! Stored at `(POLICY_ACCOUNT, admin_state_address())`. Absent state
//! authorizes nobody.

use super::PolicyViolation;
use sc_01_state_access::{load, store, StateAccessError, StateReader, StateWriter, POLICY_ACCOUNT};
use serde::{Deserialize, Serialize};
use shared_types::{derive_address, Address};

/// Slot of the admin state.
pub fn admin_state_address() -> Address {
    derive_address(b"admin_state", &[])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminState {
    pub admin_address: Address,
    /// Last block index at which the admin may act.
    pub valid_until: u64,
}

impl AdminState {
    pub fn new(admin_address: Address, valid_until: u64) -> Self {
        Self {
            admin_address,
            valid_until,
        }
    }

    pub fn authorizes(&self, signer: &Address, index: u64) -> bool {
        self.admin_address == *signer && index <= self.valid_until
    }
}

/// Load the admin state. Malformed state is a `StateLoadFailure`.
pub fn load_admin_state<S>(state: &S) -> Result<Option<AdminState>, PolicyViolation>
where
    S: StateReader + ?Sized,
{
    Ok(load::<AdminState, S>(state, &POLICY_ACCOUNT, &admin_state_address())?)
}

pub fn store_admin_state<S>(state: &mut S, admin: &AdminState) -> Result<(), StateAccessError>
where
    S: StateWriter + ?Sized,
{
    store(state, &POLICY_ACCOUNT, &admin_state_address(), admin)
}
