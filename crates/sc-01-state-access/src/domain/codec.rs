//! Typed load/store over raw state values.
//!
//! Values are bincode-encoded. An absent slot loads as `None`; a present slot
//! that fails to decode is corruption and surfaces as
//! [`StateAccessError::Decode`].

use super::StateAccessError;
use crate::ports::{StateReader, StateWriter};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::Address;

/// Encode a value the way it is persisted in state.
pub fn encode_value<T: Serialize>(value: &T) -> Result<Vec<u8>, StateAccessError> {
    bincode::serialize(value).map_err(|e| StateAccessError::Encode(e.to_string()))
}

/// Decode a persisted value, attributing failures to its slot.
pub fn decode_value<T: DeserializeOwned>(
    account: &Address,
    address: &Address,
    bytes: &[u8],
) -> Result<T, StateAccessError> {
    bincode::deserialize(bytes).map_err(|e| StateAccessError::Decode {
        account: *account,
        address: *address,
        reason: e.to_string(),
    })
}

/// Load and decode the value at `(account, address)`.
pub fn load<T, S>(state: &S, account: &Address, address: &Address) -> Result<Option<T>, StateAccessError>
where
    T: DeserializeOwned,
    S: StateReader + ?Sized,
{
    match state.get_state(account, address)? {
        Some(bytes) => decode_value(account, address, &bytes).map(Some),
        None => Ok(None),
    }
}

/// Encode and store `value` at `(account, address)`.
pub fn store<T, S>(
    state: &mut S,
    account: &Address,
    address: &Address,
    value: &T,
) -> Result<(), StateAccessError>
where
    T: Serialize,
    S: StateWriter + ?Sized,
{
    let bytes = encode_value(value)?;
    state.set_state(account, address, bytes)
}
