//! # Error Types
//!
//! Errors raised by the shared primitives themselves.

use thiserror::Error;

/// Errors from parsing key material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The bytes are not a valid SEC1-compressed secp256k1 point.
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
}

/// Errors from asset arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// Two values of different currencies were combined.
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: String, right: String },

    /// The result does not fit the raw amount type.
    #[error("Asset amount overflow")]
    Overflow,

    /// The result would be negative.
    #[error("Asset amount underflow: {minuend} - {subtrahend}")]
    Underflow { minuend: u128, subtrahend: u128 },
}

/// Errors from decoding a raw action into a typed variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to decode action {type_id}: {reason}")]
pub struct ActionDecodeError {
    pub type_id: String,
    pub reason: String,
}

impl ActionDecodeError {
    pub fn new(type_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            reason: reason.into(),
        }
    }
}
