//! # Shared Types Crate
//!
//! Chain primitives consumed by every stake-core crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: addresses, currencies, asset values and the
//!   block/transaction shapes received from the host are defined here once.
//! - **Non-negative amounts**: `FungibleAssetValue` cannot represent a negative
//!   balance; signed movements are expressed as explicit deltas by callers.
//! - **Explicit action typing**: action tags resolve through an
//!   [`ActionTypeRegistry`] populated per protocol version, never through
//!   dynamic lookup.

pub mod action_registry;
pub mod asset;
pub mod entities;
pub mod errors;
pub mod keys;

pub use action_registry::*;
pub use asset::*;
pub use entities::*;
pub use errors::*;
pub use keys::*;
