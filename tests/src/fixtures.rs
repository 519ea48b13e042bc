//! # Test Fixtures
//!
//! A minimal in-memory chain that wires the stake-core crates together the
//! way a host node does: policy check, then apply, then recompute the
//! validator set for the next height.

use std::fmt;
use std::sync::Arc;

use sc_01_state_access::{InMemoryState, LookupError, LookupPool, StateAccessError, StateWriter};
use sc_02_delegation::{
    staking_action_types, ActionOutcome, StakingAction, StakingAssets, StakingService,
    PROMOTE_VALIDATOR, REDELEGATE_VALIDATOR,
};
use sc_03_validator_set::{
    ValidatorSet, ValidatorSetConfig, ValidatorSetError, ValidatorSetSelector,
};
use sc_04_block_policy::{BlockPolicyConfig, BlockPolicyEnforcer, PolicyViolation};
use shared_types::{ActionTypeRegistry, Address, Block, RawAction, Transaction};

/// Height from which the second protocol version applies.
pub const PROTOCOL_V2_INDEX: u64 = 100;

/// Action types per protocol version.
///
/// From `PROTOCOL_V2_INDEX` on, redelegation is obsolete and promoting a
/// validator requires the admin.
pub fn chain_action_types() -> ActionTypeRegistry<StakingAction> {
    let v2: Vec<_> = staking_action_types()
        .into_iter()
        .map(|descriptor| match descriptor.info().type_id.as_str() {
            REDELEGATE_VALIDATOR => descriptor.obsolete_from(PROTOCOL_V2_INDEX),
            PROMOTE_VALIDATOR => descriptor.admin_only(),
            _ => descriptor,
        })
        .collect();

    ActionTypeRegistry::new()
        .with_version(0, staking_action_types())
        .with_version(PROTOCOL_V2_INDEX, v2)
}

#[derive(Debug)]
pub enum ChainError {
    Setup(String),
    Rejected(Vec<PolicyViolation>),
    ValidatorSet(ValidatorSetError),
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::Setup(reason) => write!(f, "setup failed: {reason}"),
            ChainError::Rejected(violations) => {
                write!(f, "block rejected with {} violation(s)", violations.len())
            }
            ChainError::ValidatorSet(e) => write!(f, "validator set: {e}"),
        }
    }
}

impl std::error::Error for ChainError {}

impl From<LookupError> for ChainError {
    fn from(e: LookupError) -> Self {
        ChainError::Setup(e.to_string())
    }
}

impl From<ValidatorSetError> for ChainError {
    fn from(e: ValidatorSetError) -> Self {
        ChainError::ValidatorSet(e)
    }
}

/// Outcome of committing a block.
#[derive(Debug)]
pub struct Committed {
    pub outcomes: Vec<ActionOutcome>,
    pub next_set: ValidatorSet,
}

pub struct TestChain {
    pub state: InMemoryState,
    pub staking: StakingService,
    pub enforcer: BlockPolicyEnforcer,
    pub selector: ValidatorSetSelector,
    pub pool: LookupPool,
    pub height: u64,
}

impl TestChain {
    pub fn new(
        policy: BlockPolicyConfig,
        validator_set: ValidatorSetConfig,
    ) -> Result<Self, ChainError> {
        Ok(Self {
            state: InMemoryState::new(),
            staking: StakingService::with_actions(StakingAssets::default(), chain_action_types()),
            enforcer: BlockPolicyEnforcer::new(Arc::new(policy), Arc::new(chain_action_types())),
            selector: ValidatorSetSelector::new(validator_set)?,
            pool: LookupPool::new(4)?,
            height: 0,
        })
    }

    pub fn with_defaults() -> Result<Self, ChainError> {
        Self::new(BlockPolicyConfig::default(), ValidatorSetConfig::default())
    }

    /// Mint consensus tokens to `address`.
    pub fn fund(&mut self, address: &Address, amount: u128) -> Result<(), StateAccessError> {
        let value = self
            .staking
            .registry()
            .assets()
            .consensus_token
            .raw(amount);
        self.state.mint(address, &value)
    }

    /// Build the block following the current height.
    pub fn propose(&self, transactions: Vec<Transaction>) -> Block {
        self.propose_at(self.height + 1, transactions)
    }

    pub fn propose_at(&self, index: u64, transactions: Vec<Transaction>) -> Block {
        let mut hash = [0u8; 32];
        hash[..8].copy_from_slice(&index.to_be_bytes());
        Block::new(index, hash, transactions)
    }

    /// Validate and, if accepted, apply `block`.
    pub fn commit(&mut self, block: &Block) -> Result<Committed, ChainError> {
        let violations = self.enforcer.validate(&self.state, block);
        if !violations.is_empty() {
            return Err(ChainError::Rejected(violations));
        }

        let outcomes = self.staking.apply_block(&mut self.state, block);
        self.height = block.index;

        let next_set = self.selector.select_from_state(
            &self.state,
            self.staking.registry(),
            &self.pool,
            block.index + 1,
        )?;
        Ok(Committed { outcomes, next_set })
    }
}

/// A transaction carrying staking actions, sized by its JSON encoding.
pub fn staking_tx(signer: Address, actions: &[StakingAction]) -> Transaction {
    let raw: Vec<RawAction> = actions.iter().map(StakingAction::to_raw).collect();
    let byte_length = serde_json::to_vec(&raw).map_or(0, |bytes| bytes.len() as u64);
    Transaction::new(signer, raw, byte_length)
}

/// A transaction of `byte_length` bytes carrying no actions.
pub fn filler_tx(signer: Address, byte_length: u64) -> Transaction {
    Transaction::new(signer, Vec::new(), byte_length)
}
