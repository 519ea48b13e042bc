//! Policy violations and configuration errors

use sc_01_state_access::StateAccessError;
use shared_types::{format_address, Address};
use std::fmt;

/// Which end of the transaction-count range was crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountBound {
    Min,
    Max,
}

impl fmt::Display for CountBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountBound::Min => write!(f, "minimum"),
            CountBound::Max => write!(f, "maximum"),
        }
    }
}

/// A rejected block or transaction, with the rule that rejected it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyViolation {
    #[error("Transaction bytes exceed limit: {actual} > {limit}")]
    BlockSizeExceeded { actual: u128, limit: u64 },

    #[error("Transaction count {actual} violates {direction} of {bound}")]
    TxCountOutOfRange {
        actual: usize,
        bound: u64,
        direction: CountBound,
    },

    #[error("Signer {} has {actual} transactions in block, limit {limit}", format_address(.signer))]
    TxCountPerSignerExceeded {
        signer: Address,
        actual: usize,
        limit: u64,
    },

    #[error("Action {type_id} is obsolete from {obsolete_from}, used at {index}")]
    ObsoleteActionUsed {
        type_id: String,
        obsolete_from: u64,
        index: u64,
    },

    #[error("Signer {} is not authorized for admin action {type_id}", format_address(.signer))]
    UnauthorizedAdminAction { signer: Address, type_id: String },

    #[error("State load failure: {0}")]
    StateLoadFailure(String),
}

impl From<StateAccessError> for PolicyViolation {
    fn from(error: StateAccessError) -> Self {
        PolicyViolation::StateLoadFailure(error.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyConfigError {
    #[error("Invalid policy config: {0}")]
    InvalidPolicyConfig(String),

    #[error("Failed to parse policy config: {0}")]
    Parse(String),

    #[error("State error: {0}")]
    State(#[from] StateAccessError),
}

/// Result type for policy configuration
pub type ConfigResult<T> = Result<T, PolicyConfigError>;
