//! Well-known accounts owned by this core.
//!
//! System accounts are the zero address with the account id in the last byte,
//! so they cannot collide with key-derived addresses in practice.

use shared_types::Address;

const fn system_account(id: u8) -> Address {
    let mut address = [0u8; 20];
    address[19] = id;
    address
}

/// Validator entities, keyed by validator address.
pub const VALIDATOR_ACCOUNT: Address = system_account(0x01);

/// Delegation share balances, keyed by the derived delegation address.
pub const DELEGATION_ACCOUNT: Address = system_account(0x02);

/// Registry metadata such as the validator index.
pub const REGISTRY_ACCOUNT: Address = system_account(0x03);

/// Admin state and block policy configuration.
pub const POLICY_ACCOUNT: Address = system_account(0x04);
