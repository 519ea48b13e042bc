//! # sc-04-block-policy
//!
//! Deterministic admission policy for blocks and transactions.
//!
//! ## Role in System
//!
//! The host consults [`BlockPolicyEnforcer`] before accepting a transaction
//! into its pool ([`BlockPolicyEnforcer::validate_tx`]) and before accepting a
//! block ([`BlockPolicyEnforcer::validate`]). Both are pure functions of the
//! configuration and a read-only state snapshot at the block's height.
//!
//! ```text
//! PolicyLoader ──→ BlockPolicyConfig (SubPolicy per tunable)
//!                        │
//! ActionTypeLoader ──→ BlockPolicyEnforcer ←── StateReader (AdminState)
//!                        │
//!                        └──→ Vec<PolicyViolation>
//! ```

pub mod config;
pub mod domain;
pub mod enforcer;
pub mod loader;

pub use config::BlockPolicyConfig;
pub use domain::*;
pub use enforcer::BlockPolicyEnforcer;
pub use loader::{policy_config_address, store_policy_config, PolicyLoader};
