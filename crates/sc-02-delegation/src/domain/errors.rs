//! Error types for the delegation subsystem

use sc_01_state_access::StateAccessError;
use shared_types::{format_address, ActionDecodeError, Address, KeyError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StakingError {
    #[error("Currency type mismatch: expected {expected}, got {actual}")]
    CurrencyTypeMismatch { expected: String, actual: String },

    #[error("Insufficient shares in {}: requested {requested}, available {available}", format_address(.validator))]
    InsufficientShares {
        validator: Address,
        requested: u128,
        available: u128,
    },

    #[error("Delegation of {} to {} would go negative: balance {balance}, decrease {decrease}", format_address(.delegator), format_address(.validator))]
    NegativeBalance {
        delegator: Address,
        validator: Address,
        balance: u128,
        decrease: u128,
    },

    #[error("Unknown validator: {}", format_address(.0))]
    UnknownValidator(Address),

    #[error("Amount must be positive")]
    ZeroAmount,

    #[error("Bonded pool is empty while {total_shares} shares are outstanding")]
    EmptyBondedPool { total_shares: u128 },

    #[error("Cannot redelegate from a validator to itself")]
    SelfRedelegation,

    #[error("Signer {} cannot promote the key of validator {}", format_address(.signer), format_address(.validator))]
    ForeignValidatorKey { signer: Address, validator: Address },

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    #[error("Insufficient balance at {}: required {required}, available {available}", format_address(.address))]
    InsufficientBalance {
        address: Address,
        required: u128,
        available: u128,
    },

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(#[from] KeyError),

    #[error("Invalid staking action: {0}")]
    InvalidAction(#[from] ActionDecodeError),

    /// Present state that does not decode or violates a stored invariant.
    #[error("State load failure: {0}")]
    StateLoadFailure(String),

    #[error("State error: {0}")]
    State(StateAccessError),
}

impl From<StateAccessError> for StakingError {
    fn from(error: StateAccessError) -> Self {
        match error {
            StateAccessError::Decode { .. } => StakingError::StateLoadFailure(error.to_string()),
            StateAccessError::InsufficientBalance {
                address,
                required,
                available,
            } => StakingError::InsufficientBalance {
                address,
                required,
                available,
            },
            other => StakingError::State(other),
        }
    }
}

/// Result type for staking operations
pub type StakingResult<T> = Result<T, StakingError>;
