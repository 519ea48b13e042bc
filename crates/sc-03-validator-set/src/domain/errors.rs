//! Error types for validator set selection

use sc_02_delegation::StakingError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidatorSetError {
    #[error("Invalid validator set config: {0}")]
    InvalidConfig(String),

    #[error("Failed to load registry snapshot: {0}")]
    Snapshot(#[from] StakingError),
}

/// Result type for validator set operations
pub type Result<T> = std::result::Result<T, ValidatorSetError>;
