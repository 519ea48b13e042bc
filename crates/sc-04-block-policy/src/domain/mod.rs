//! Policy domain: sub-policies, admin state and violations.

mod admin;
mod errors;
mod sub_policy;

pub use admin::*;
pub use errors::*;
pub use sub_policy::*;
