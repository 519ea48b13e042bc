//! # Staking Service
//!
//! Applies the staking actions of a committed block. Actions run in
//! transaction order with the transaction signer as delegator. A failing
//! action is reported in the outcome list and skipped; it never aborts the
//! block. Actions whose tag is not a staking type at the block's height are
//! left to other handlers and produce no outcome.

use crate::config::StakingAssets;
use crate::domain::{share_currency, staking_action_registry, StakingAction, StakingError, StakingResult};
use crate::exchange::{ShareExchange, StakingEffect};
use crate::registry::ValidatorRegistry;
use sc_01_state_access::StateWriter;
use shared_types::{format_address, ActionTypeRegistry, Address, Block};
use tracing::{debug, info, warn};

/// Result of one staking action inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub tx_index: usize,
    pub action_index: usize,
    pub type_id: String,
    pub result: StakingResult<StakingEffect>,
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

pub struct StakingService {
    exchange: ShareExchange,
    actions: ActionTypeRegistry<StakingAction>,
}

impl Default for StakingService {
    fn default() -> Self {
        Self::new(StakingAssets::default())
    }
}

impl StakingService {
    /// A service with the genesis staking action set.
    pub fn new(assets: StakingAssets) -> Self {
        Self::with_actions(assets, staking_action_registry())
    }

    /// A service resolving actions through a custom versioned registry.
    pub fn with_actions(assets: StakingAssets, actions: ActionTypeRegistry<StakingAction>) -> Self {
        Self {
            exchange: ShareExchange::new(assets),
            actions,
        }
    }

    pub fn exchange(&self) -> &ShareExchange {
        &self.exchange
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        self.exchange.registry()
    }

    /// The action registry, which also serves as the policy layer's type
    /// loader.
    pub fn action_types(&self) -> &ActionTypeRegistry<StakingAction> {
        &self.actions
    }

    /// Apply one decoded action on behalf of `signer`.
    pub fn apply<S>(&self, state: &mut S, signer: &Address, action: &StakingAction) -> StakingResult<StakingEffect>
    where
        S: StateWriter + ?Sized,
    {
        let consensus = &self.registry().assets().consensus_token;
        match action {
            StakingAction::PromoteValidator { public_key, amount } => {
                if public_key.address() != *signer {
                    return Err(StakingError::ForeignValidatorKey {
                        signer: *signer,
                        validator: public_key.address(),
                    });
                }
                self.exchange
                    .bond(state, signer, public_key, &consensus.raw(*amount))
            }
            StakingAction::Delegate { validator, amount } => {
                self.exchange
                    .delegate(state, signer, validator, &consensus.raw(*amount))
            }
            StakingAction::Undelegate { validator, shares } => self.exchange.unbond(
                state,
                signer,
                validator,
                &share_currency(validator).raw(*shares),
            ),
            StakingAction::Redelegate { src, dst, shares } => self.exchange.redelegate(
                state,
                signer,
                src,
                dst,
                &share_currency(src).raw(*shares),
            ),
        }
    }

    /// Apply every staking action of `block`.
    pub fn apply_block<S>(&self, state: &mut S, block: &Block) -> Vec<ActionOutcome>
    where
        S: StateWriter + ?Sized,
    {
        let mut outcomes = Vec::new();

        for (tx_index, tx) in block.transactions.iter().enumerate() {
            for (action_index, raw) in tx.actions.iter().enumerate() {
                let Some(decoded) = self.actions.decode(raw, block.index) else {
                    continue;
                };
                let type_id = raw.type_id().unwrap_or_default().to_string();

                let result = decoded
                    .map_err(StakingError::from)
                    .and_then(|action| self.apply(state, &tx.signer, &action));

                match &result {
                    Ok(effect) => debug!(
                        block_index = block.index,
                        tx_index,
                        action_index,
                        ?effect,
                        "Staking action applied"
                    ),
                    Err(error) => warn!(
                        block_index = block.index,
                        tx_index,
                        action_index,
                        signer = %format_address(&tx.signer),
                        %type_id,
                        %error,
                        "Staking action skipped"
                    ),
                }

                outcomes.push(ActionOutcome {
                    tx_index,
                    action_index,
                    type_id,
                    result,
                });
            }
        }

        let applied = outcomes.iter().filter(|o| o.is_success()).count();
        info!(
            block_index = block.index,
            applied,
            skipped = outcomes.len() - applied,
            "Staking actions processed"
        );
        outcomes
    }
}
