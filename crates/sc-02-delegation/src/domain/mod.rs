//! Domain layer: entities, actions, exchange-rate math and errors.

mod actions;
mod delegation;
mod errors;
mod exchange_rate;
mod validator;

pub use actions::*;
pub use delegation::*;
pub use errors::*;
pub use exchange_rate::*;
pub use validator::*;
