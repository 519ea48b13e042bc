//! Staking actions and their wire payloads.
//!
//! Payloads are JSON objects. Addresses and public keys are hex strings;
//! amounts are raw units written as decimal strings so they survive JSON
//! consumers limited to 53-bit integers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DisplayFromStr};
use shared_types::{
    ActionDecodeError, ActionTypeDescriptor, ActionTypeRegistry, Address, PublicKey, RawAction,
};

pub const PROMOTE_VALIDATOR: &str = "promote_validator";
pub const DELEGATE_VALIDATOR: &str = "delegate_validator";
pub const UNDELEGATE_VALIDATOR: &str = "undelegate_validator";
pub const REDELEGATE_VALIDATOR: &str = "redelegate_validator";

/// A decoded staking action. Amounts are raw consensus-token units; shares
/// are raw units of the relevant validator's share currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StakingAction {
    /// Register the signer's validator key (if new) and bond `amount` to it.
    PromoteValidator { public_key: PublicKey, amount: u128 },
    Delegate { validator: Address, amount: u128 },
    Undelegate { validator: Address, shares: u128 },
    Redelegate {
        src: Address,
        dst: Address,
        shares: u128,
    },
}

#[serde_as]
#[derive(Serialize, Deserialize)]
struct PromotePayload {
    public_key: String,
    #[serde_as(as = "DisplayFromStr")]
    amount: u128,
}

#[serde_as]
#[derive(Serialize, Deserialize)]
struct DelegatePayload {
    validator: String,
    #[serde_as(as = "DisplayFromStr")]
    amount: u128,
}

#[serde_as]
#[derive(Serialize, Deserialize)]
struct UndelegatePayload {
    validator: String,
    #[serde_as(as = "DisplayFromStr")]
    shares: u128,
}

#[serde_as]
#[derive(Serialize, Deserialize)]
struct RedelegatePayload {
    src: String,
    dst: String,
    #[serde_as(as = "DisplayFromStr")]
    shares: u128,
}

impl StakingAction {
    pub fn type_id(&self) -> &'static str {
        match self {
            StakingAction::PromoteValidator { .. } => PROMOTE_VALIDATOR,
            StakingAction::Delegate { .. } => DELEGATE_VALIDATOR,
            StakingAction::Undelegate { .. } => UNDELEGATE_VALIDATOR,
            StakingAction::Redelegate { .. } => REDELEGATE_VALIDATOR,
        }
    }

    /// Encode as a tagged raw action.
    pub fn to_raw(&self) -> RawAction {
        let values = match self {
            StakingAction::PromoteValidator { public_key, amount } => to_value(PromotePayload {
                public_key: hex::encode(public_key.as_bytes()),
                amount: *amount,
            }),
            StakingAction::Delegate { validator, amount } => to_value(DelegatePayload {
                validator: hex::encode(validator),
                amount: *amount,
            }),
            StakingAction::Undelegate { validator, shares } => to_value(UndelegatePayload {
                validator: hex::encode(validator),
                shares: *shares,
            }),
            StakingAction::Redelegate { src, dst, shares } => to_value(RedelegatePayload {
                src: hex::encode(src),
                dst: hex::encode(dst),
                shares: *shares,
            }),
        };
        RawAction::new(self.type_id(), values)
    }
}

fn to_value<T: Serialize>(payload: T) -> Value {
    // Payload structs hold only strings, which always serialize
    serde_json::to_value(payload).unwrap_or(Value::Null)
}

fn payload<'a, T: Deserialize<'a>>(type_id: &str, values: &'a Value) -> Result<T, ActionDecodeError> {
    T::deserialize(values).map_err(|e| ActionDecodeError::new(type_id, e.to_string()))
}

fn parse_address(type_id: &str, field: &str, text: &str) -> Result<Address, ActionDecodeError> {
    let bytes = hex::decode(text.trim_start_matches("0x"))
        .map_err(|e| ActionDecodeError::new(type_id, format!("{field}: {e}")))?;
    Address::try_from(bytes.as_slice()).map_err(|_| {
        ActionDecodeError::new(
            type_id,
            format!("{field}: expected 20 bytes, got {}", bytes.len()),
        )
    })
}

fn decode_promote(values: &Value) -> Result<StakingAction, ActionDecodeError> {
    let p: PromotePayload = payload(PROMOTE_VALIDATOR, values)?;
    let bytes = hex::decode(p.public_key.trim_start_matches("0x"))
        .map_err(|e| ActionDecodeError::new(PROMOTE_VALIDATOR, format!("public_key: {e}")))?;
    let public_key = PublicKey::from_bytes(&bytes)
        .map_err(|e| ActionDecodeError::new(PROMOTE_VALIDATOR, e.to_string()))?;
    Ok(StakingAction::PromoteValidator {
        public_key,
        amount: p.amount,
    })
}

fn decode_delegate(values: &Value) -> Result<StakingAction, ActionDecodeError> {
    let p: DelegatePayload = payload(DELEGATE_VALIDATOR, values)?;
    Ok(StakingAction::Delegate {
        validator: parse_address(DELEGATE_VALIDATOR, "validator", &p.validator)?,
        amount: p.amount,
    })
}

fn decode_undelegate(values: &Value) -> Result<StakingAction, ActionDecodeError> {
    let p: UndelegatePayload = payload(UNDELEGATE_VALIDATOR, values)?;
    Ok(StakingAction::Undelegate {
        validator: parse_address(UNDELEGATE_VALIDATOR, "validator", &p.validator)?,
        shares: p.shares,
    })
}

fn decode_redelegate(values: &Value) -> Result<StakingAction, ActionDecodeError> {
    let p: RedelegatePayload = payload(REDELEGATE_VALIDATOR, values)?;
    Ok(StakingAction::Redelegate {
        src: parse_address(REDELEGATE_VALIDATOR, "src", &p.src)?,
        dst: parse_address(REDELEGATE_VALIDATOR, "dst", &p.dst)?,
        shares: p.shares,
    })
}

/// Descriptors for every staking action type.
pub fn staking_action_types() -> Vec<ActionTypeDescriptor<StakingAction>> {
    vec![
        ActionTypeDescriptor::new(PROMOTE_VALIDATOR, decode_promote),
        ActionTypeDescriptor::new(DELEGATE_VALIDATOR, decode_delegate),
        ActionTypeDescriptor::new(UNDELEGATE_VALIDATOR, decode_undelegate),
        ActionTypeDescriptor::new(REDELEGATE_VALIDATOR, decode_redelegate),
    ]
}

/// A registry with the staking action types active from genesis.
pub fn staking_action_registry() -> ActionTypeRegistry<StakingAction> {
    ActionTypeRegistry::new().with_version(0, staking_action_types())
}
