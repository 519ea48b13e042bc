//! Configuration for validator set selection

use crate::domain::{Result, ValidatorSetError};
use serde::Deserialize;

/// Default cap on the active validator set.
pub const DEFAULT_MAX_VALIDATORS: usize = 100;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ValidatorSetConfig {
    /// Maximum number of validators in the active set (default: 100)
    pub max_validators: usize,
}

impl Default for ValidatorSetConfig {
    fn default() -> Self {
        Self {
            max_validators: DEFAULT_MAX_VALIDATORS,
        }
    }
}

impl ValidatorSetConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_validators == 0 {
            return Err(ValidatorSetError::InvalidConfig(
                "max_validators must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
