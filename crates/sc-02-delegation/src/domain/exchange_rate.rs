//! Share/principal conversion at the pool exchange rate.
//!
//! Rate = bonded pool balance / total shares, 1:1 while no shares exist.
//! Products are formed in 256 bits so they cannot overflow; quotients are
//! floored. Issuing rounds down so new shares never dilute existing holders;
//! redeeming rounds down in favour of the remaining pool.

use super::{StakingError, StakingResult};
use primitive_types::U256;
use shared_types::Address;

/// Shares issued for bonding `principal`.
pub fn shares_to_issue(principal: u128, total_shares: u128, pool_balance: u128) -> StakingResult<u128> {
    if total_shares == 0 {
        return Ok(principal);
    }
    if pool_balance == 0 {
        return Err(StakingError::EmptyBondedPool { total_shares });
    }
    mul_div_floor(principal, total_shares, pool_balance)
}

/// Principal returned for redeeming `shares` of `validator`.
pub fn principal_to_return(
    validator: &Address,
    shares: u128,
    total_shares: u128,
    pool_balance: u128,
) -> StakingResult<u128> {
    if total_shares == 0 {
        return Err(StakingError::InsufficientShares {
            validator: *validator,
            requested: shares,
            available: 0,
        });
    }
    mul_div_floor(shares, pool_balance, total_shares)
}

/// floor(a * b / d); `d` must be nonzero.
fn mul_div_floor(a: u128, b: u128, d: u128) -> StakingResult<u128> {
    let quotient = U256::from(a) * U256::from(b) / U256::from(d);
    if quotient > U256::from(u128::MAX) {
        return Err(StakingError::ArithmeticOverflow);
    }
    Ok(quotient.as_u128())
}
