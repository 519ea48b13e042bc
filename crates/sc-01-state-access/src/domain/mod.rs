//! Domain layer for state access

pub mod accounts;
mod cache;
mod codec;
mod errors;
mod lookup;

pub use accounts::*;
pub use cache::*;
pub use codec::*;
pub use errors::*;
pub use lookup::*;
