//! # Currencies and Asset Values
//!
//! Amounts are raw unsigned integers in the currency's smallest unit. All
//! arithmetic is checked; nothing here rounds.

use crate::errors::AssetError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fungible currency, identified structurally.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Currency {
    /// Ticker symbol.
    pub ticker: String,
    /// Number of decimal places of the smallest unit.
    pub decimal_places: u8,
}

impl Currency {
    pub fn new(ticker: impl Into<String>, decimal_places: u8) -> Self {
        Self {
            ticker: ticker.into(),
            decimal_places,
        }
    }

    /// A zero amount of this currency.
    pub fn zero(&self) -> FungibleAssetValue {
        FungibleAssetValue::new(self.clone(), 0)
    }

    /// An amount of this currency in raw units.
    pub fn raw(&self, raw: u128) -> FungibleAssetValue {
        FungibleAssetValue::new(self.clone(), raw)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ticker)
    }
}

/// A non-negative amount of a specific currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FungibleAssetValue {
    pub currency: Currency,
    pub raw: u128,
}

impl FungibleAssetValue {
    pub fn new(currency: Currency, raw: u128) -> Self {
        Self { currency, raw }
    }

    pub fn is_zero(&self) -> bool {
        self.raw == 0
    }

    fn ensure_same_currency(&self, other: &Self) -> Result<(), AssetError> {
        if self.currency != other.currency {
            return Err(AssetError::CurrencyMismatch {
                left: self.currency.ticker.clone(),
                right: other.currency.ticker.clone(),
            });
        }
        Ok(())
    }

    /// Add two values of the same currency.
    pub fn checked_add(&self, other: &Self) -> Result<Self, AssetError> {
        self.ensure_same_currency(other)?;
        let raw = self.raw.checked_add(other.raw).ok_or(AssetError::Overflow)?;
        Ok(Self::new(self.currency.clone(), raw))
    }

    /// Subtract a value of the same currency; fails rather than going negative.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, AssetError> {
        self.ensure_same_currency(other)?;
        let raw = self
            .raw
            .checked_sub(other.raw)
            .ok_or(AssetError::Underflow {
                minuend: self.raw,
                subtrahend: other.raw,
            })?;
        Ok(Self::new(self.currency.clone(), raw))
    }
}

impl fmt::Display for FungibleAssetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.raw, self.currency)
    }
}
