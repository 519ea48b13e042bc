//! # Keys and Address Derivation
//!
//! Validator identities are secp256k1 public keys; the on-chain address is the
//! last 20 bytes of Keccak-256 over the uncompressed point (without the `0x04`
//! prefix).

use crate::entities::Address;
use crate::errors::KeyError;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use sha3::{Digest, Keccak256};
use std::fmt;

/// Length of a SEC1-compressed secp256k1 public key.
pub const COMPRESSED_PUBLIC_KEY_LEN: usize = 33;

/// A validated secp256k1 public key with its derived address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PublicKeyBytes", into = "PublicKeyBytes")]
pub struct PublicKey {
    bytes: [u8; COMPRESSED_PUBLIC_KEY_LEN],
    address: Address,
}

#[serde_as]
#[derive(Serialize, Deserialize)]
struct PublicKeyBytes(#[serde_as(as = "Bytes")] [u8; COMPRESSED_PUBLIC_KEY_LEN]);

impl PublicKey {
    /// Parse a public key from SEC1 bytes (compressed or uncompressed).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let key = k256::PublicKey::from_sec1_bytes(bytes)
            .map_err(|e| KeyError::InvalidPublicKey(e.to_string()))?;
        Ok(Self::from_k256(&key))
    }

    fn from_k256(key: &k256::PublicKey) -> Self {
        let compressed = key.to_encoded_point(true);
        let mut bytes = [0u8; COMPRESSED_PUBLIC_KEY_LEN];
        bytes.copy_from_slice(compressed.as_bytes());
        Self {
            bytes,
            address: address_from_public_key(key),
        }
    }

    /// The compressed encoding.
    pub fn as_bytes(&self) -> &[u8; COMPRESSED_PUBLIC_KEY_LEN] {
        &self.bytes
    }

    /// The address derived from this key.
    pub fn address(&self) -> Address {
        self.address
    }
}

impl TryFrom<PublicKeyBytes> for PublicKey {
    type Error = KeyError;

    fn try_from(value: PublicKeyBytes) -> Result<Self, Self::Error> {
        Self::from_bytes(&value.0)
    }
}

impl From<PublicKey> for PublicKeyBytes {
    fn from(value: PublicKey) -> Self {
        PublicKeyBytes(value.bytes)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.bytes))
    }
}

/// Derive an address from a secp256k1 public key.
pub fn address_from_public_key(key: &k256::PublicKey) -> Address {
    let uncompressed = key.to_encoded_point(false);
    let hash = Keccak256::digest(&uncompressed.as_bytes()[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Derive a deterministic address from a domain tag and a list of parts.
///
/// Used for state slots that belong to a pair of addresses (delegations) or to
/// a validator (its bonded pool).
pub fn derive_address(tag: &[u8], parts: &[&[u8]]) -> Address {
    let mut hasher = Keccak256::new();
    hasher.update(tag);
    for part in parts {
        hasher.update(part);
    }
    let hash = hasher.finalize();

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Deterministic key material for tests across the workspace.
pub mod testing {
    use super::PublicKey;

    /// Build a valid public key from a one-byte seed.
    pub fn public_key_from_seed(seed: u8) -> PublicKey {
        let mut secret = [0x11u8; 32];
        secret[31] = seed;
        let secret = k256::SecretKey::from_slice(&secret).expect("seeded scalar is in range");
        PublicKey::from_k256(&secret.public_key())
    }
}
