//! Validator set domain types and errors.

mod errors;
mod validator_set;

pub use errors::*;
pub use validator_set::*;
