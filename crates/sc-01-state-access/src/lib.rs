//! # sc-01-state-access
//!
//! The seam between the stake-core crates and the host chain engine.
//!
//! ## Role in System
//!
//! - **Ports**: [`StateReader`] / [`StateWriter`] are the only way the core
//!   touches chain state (GetState/SetState and the token ledger primitives
//!   GetBalance/Mint/Burn/Transfer).
//! - **Codec**: typed load/store over the opaque byte values the host keeps.
//! - **Read fan-out**: [`LookupPool`] runs independent read-only lookups on a
//!   fixed number of workers and joins them in input order.
//! - **Parse cache**: [`ContentCache`] memoises parsed configuration keyed by
//!   the SHA-256 of its source bytes, with bounded LRU eviction.
//!
//! ```text
//!   sc-02-delegation ─┐
//!   sc-03-validator-set ├──→ StateReader / StateWriter ──→ [host state]
//!   sc-04-block-policy ─┘          │
//!                                  └── InMemoryState (tests, embedders)
//! ```
//!
//! ## Determinism
//!
//! Nothing here introduces observable nondeterminism: the lookup pool returns
//! results (and the first error) in input order, and a cache hit yields the
//! value a cold parse of the same bytes would.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::InMemoryState;
pub use config::LookupConfig;
pub use domain::*;
pub use ports::{StateReader, StateWriter};
