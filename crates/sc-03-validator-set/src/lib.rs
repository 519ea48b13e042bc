//! # sc-03-validator-set
//!
//! Computes the ranked, bounded set of validators eligible for consensus at a
//! height from a read-only registry snapshot.
//!
//! ```text
//! StateReader ──→ ValidatorRegistry::snapshot (LookupPool) ──→ ValidatorSetSelector::select ──→ ValidatorSet
//! ```
//!
//! Selection never mutates state. Zero-stake validators remain registered;
//! they are only left out of the active set.

pub mod config;
pub mod domain;
pub mod selector;

pub use config::{ValidatorSetConfig, DEFAULT_MAX_VALIDATORS};
pub use domain::*;
pub use selector::ValidatorSetSelector;
