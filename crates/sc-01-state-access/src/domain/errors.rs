use shared_types::{format_address, Address, AssetError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateAccessError {
    #[error("State backend error: {0}")]
    Backend(String),

    /// Present but malformed state. Never defaulted.
    #[error("Corrupt state at {}/{}: {reason}", format_address(.account), format_address(.address))]
    Decode {
        account: Address,
        address: Address,
        reason: String,
    },

    #[error("Serialization error: {0}")]
    Encode(String),

    #[error("Insufficient balance at {}: required {required}, available {available}", format_address(.address))]
    InsufficientBalance {
        address: Address,
        required: u128,
        available: u128,
    },

    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Lookup pool needs at least one worker")]
    ZeroWorkers,

    #[error("Failed to build lookup pool: {0}")]
    PoolBuild(String),
}
