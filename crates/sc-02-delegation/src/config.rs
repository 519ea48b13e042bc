//! Configuration types for staking

use serde::{Deserialize, Serialize};
use shared_types::Currency;

/// The chain-level currencies the staking layer distinguishes.
///
/// Principal is bonded in the consensus token. Neither chain token may ever
/// denominate validator shares.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingAssets {
    /// Token bonded into validator pools (default: CON, 18 decimals)
    pub consensus_token: Currency,

    /// Governance token (default: GOV, 18 decimals)
    pub governance_token: Currency,
}

impl Default for StakingAssets {
    fn default() -> Self {
        Self {
            consensus_token: Currency::new("CON", 18),
            governance_token: Currency::new("GOV", 18),
        }
    }
}

impl StakingAssets {
    /// Whether `currency` is one of the chain tokens.
    pub fn is_chain_token(&self, currency: &Currency) -> bool {
        *currency == self.consensus_token || *currency == self.governance_token
    }
}
