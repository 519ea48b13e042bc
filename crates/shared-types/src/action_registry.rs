//! # Action Type Registry
//!
//! Maps action type tags to typed decoders, scoped by protocol version.
//!
//! Each protocol version is registered with the block index it becomes active
//! at and carries the complete set of action types that exist under it. A
//! lookup at index `i` consults the version with the greatest start index
//! `<= i`. Tags unknown to that version resolve to `None`; callers decide how
//! to treat them.

use crate::entities::RawAction;
use crate::errors::ActionDecodeError;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Constructor from an action payload to a typed variant.
pub type ActionDecoder<A> = fn(&Value) -> Result<A, ActionDecodeError>;

/// Metadata the policy layer needs about an action type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTypeInfo {
    /// The tag the type is registered under.
    pub type_id: String,
    /// Block index the type is marked obsolete from, if any.
    pub obsolete_from: Option<u64>,
    /// Whether only the admin may sign transactions carrying this type.
    pub admin_only: bool,
}

/// Height-scoped resolution of action type metadata.
pub trait ActionTypeLoader: Send + Sync {
    /// Resolve `type_id` as it exists at block `index`.
    fn resolve(&self, type_id: &str, index: u64) -> Option<&ActionTypeInfo>;
}

/// One registered action type: metadata plus its decoder.
pub struct ActionTypeDescriptor<A> {
    info: ActionTypeInfo,
    decode: ActionDecoder<A>,
}

impl<A> ActionTypeDescriptor<A> {
    pub fn new(type_id: impl Into<String>, decode: ActionDecoder<A>) -> Self {
        Self {
            info: ActionTypeInfo {
                type_id: type_id.into(),
                obsolete_from: None,
                admin_only: false,
            },
            decode,
        }
    }

    /// Mark the type obsolete from `index`.
    pub fn obsolete_from(mut self, index: u64) -> Self {
        self.info.obsolete_from = Some(index);
        self
    }

    /// Restrict the type to admin-signed transactions.
    pub fn admin_only(mut self) -> Self {
        self.info.admin_only = true;
        self
    }

    pub fn info(&self) -> &ActionTypeInfo {
        &self.info
    }
}

impl<A> Clone for ActionTypeDescriptor<A> {
    fn clone(&self) -> Self {
        Self {
            info: self.info.clone(),
            decode: self.decode,
        }
    }
}

/// Registry of action types per protocol version.
pub struct ActionTypeRegistry<A> {
    versions: BTreeMap<u64, HashMap<String, ActionTypeDescriptor<A>>>,
}

impl<A> ActionTypeRegistry<A> {
    pub fn new() -> Self {
        Self {
            versions: BTreeMap::new(),
        }
    }

    /// Register the complete action set of the protocol version active from
    /// `start_index`. Re-registering a start index replaces that version.
    pub fn with_version(
        mut self,
        start_index: u64,
        descriptors: impl IntoIterator<Item = ActionTypeDescriptor<A>>,
    ) -> Self {
        let types = descriptors
            .into_iter()
            .map(|d| (d.info.type_id.clone(), d))
            .collect();
        self.versions.insert(start_index, types);
        self
    }

    fn version_at(&self, index: u64) -> Option<&HashMap<String, ActionTypeDescriptor<A>>> {
        self.versions
            .range(..=index)
            .next_back()
            .map(|(_, types)| types)
    }

    /// Number of registered protocol versions.
    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    /// Decode a raw action as it exists at block `index`.
    ///
    /// Returns `None` when the action has no tag or the tag is not registered
    /// at that height.
    pub fn decode(&self, action: &RawAction, index: u64) -> Option<Result<A, ActionDecodeError>> {
        let type_id = action.type_id()?;
        let descriptor = self.version_at(index)?.get(type_id)?;
        Some((descriptor.decode)(action.values()))
    }
}

impl<A> Default for ActionTypeRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> ActionTypeLoader for ActionTypeRegistry<A> {
    fn resolve(&self, type_id: &str, index: u64) -> Option<&ActionTypeInfo> {
        self.version_at(index)?.get(type_id).map(|d| &d.info)
    }
}
