//! # Chain Shapes
//!
//! The block and transaction shapes this core consumes from the host chain
//! engine. Signing, hashing and networking belong to the host; only the fields
//! the policy and staking layers read are modelled here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A 32-byte hash.
pub type Hash = [u8; 32];

/// A 20-byte address. Ordering is lexicographic over the bytes.
pub type Address = [u8; 20];

/// Render an address for logs and error messages.
pub fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// An encoded action as carried inside a transaction.
///
/// The host encodes actions as generic structured values of the form
/// `{"type_id": <tag>, "values": <payload>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAction(pub Value);

impl RawAction {
    /// Build a tagged action value.
    pub fn new(type_id: &str, values: Value) -> Self {
        Self(serde_json::json!({ "type_id": type_id, "values": values }))
    }

    /// The declared type tag, if any.
    pub fn type_id(&self) -> Option<&str> {
        self.0.get("type_id").and_then(Value::as_str)
    }

    /// The action payload; `Null` when absent.
    pub fn values(&self) -> &Value {
        self.0.get("values").unwrap_or(&Value::Null)
    }
}

/// A transaction as seen by the policy layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Address of the signer.
    pub signer: Address,
    /// Encoded actions, in execution order.
    pub actions: Vec<RawAction>,
    /// Serialized size of the transaction in bytes.
    pub byte_length: u64,
}

impl Transaction {
    pub fn new(signer: Address, actions: Vec<RawAction>, byte_length: u64) -> Self {
        Self {
            signer,
            actions,
            byte_length,
        }
    }
}

/// A candidate or committed block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Height of the block.
    pub index: u64,
    /// Block hash assigned by the host.
    pub hash: Hash,
    /// Transactions in block order.
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(index: u64, hash: Hash, transactions: Vec<Transaction>) -> Self {
        Self {
            index,
            hash,
            transactions,
        }
    }

    /// Sum of the serialized sizes of all transactions.
    pub fn total_tx_bytes(&self) -> u128 {
        self.transactions
            .iter()
            .map(|tx| u128::from(tx.byte_length))
            .sum()
    }
}
