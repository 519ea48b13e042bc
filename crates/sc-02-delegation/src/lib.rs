//! # sc-02-delegation
//!
//! Delegated proof-of-stake accounting: validators, per-delegator share
//! balances and the exchange between consensus-token principal and
//! validator-specific shares.
//!
//! ## Components
//!
//! - [`ValidatorRegistry`]: persists validators and delegations, keeps the
//!   validator index, and records share deltas atomically.
//! - [`ShareExchange`]: quotes and applies bond, unbond and redelegate at the
//!   pool exchange rate.
//! - [`StakingService`]: decodes the staking actions of a committed block and
//!   applies them in order.
//!
//! ## Invariants
//!
//! - For every validator, the sum of per-delegator shares equals its
//!   aggregate `delegator_shares`.
//! - Shares are never denominated in the consensus or governance token.
//! - Conversions floor; intermediate products are 256-bit.
//!
//! ```text
//! Block ──→ StakingService ──→ ShareExchange ──→ ValidatorRegistry ──→ StateWriter
//!                                   │
//!                                   └── transfer principal ⇄ bonded pool
//! ```

pub mod config;
pub mod domain;
pub mod exchange;
pub mod registry;
pub mod service;

pub use config::StakingAssets;
pub use domain::*;
pub use exchange::{ShareExchange, StakingEffect};
pub use registry::{validator_index_address, DelegationUpdate, ValidatorRegistry, ValidatorStake};
pub use service::{ActionOutcome, StakingService};
