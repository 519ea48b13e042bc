//! # Stake-Core Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # In-memory chain wiring every crate together
//! └── integration/      # Cross-crate flows
//!     ├── staking_flow.rs
//!     ├── policy_flow.rs
//!     └── telemetry.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sc-tests
//!
//! # By flow
//! cargo test -p sc-tests integration::staking_flow
//! cargo test -p sc-tests integration::policy_flow
//!
//! # Benchmarks
//! cargo bench -p sc-tests
//! ```

pub mod fixtures;
