//! # Sub-Policy
//!
//! A height-indexed step function: a default value plus ordered
//! `(threshold_index, value)` pairs. The value at index `i` comes from the
//! last threshold `<= i`, or the default when none applies.
//!
//! Thresholds must be strictly ascending; anything else is rejected at
//! construction and on deserialization.

use super::{ConfigResult, PolicyConfigError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "SubPolicyRecord<T>",
    into = "SubPolicyRecord<T>",
    bound(
        serialize = "T: Serialize + Clone",
        deserialize = "T: Deserialize<'de>"
    )
)]
pub struct SubPolicy<T> {
    default: T,
    thresholds: Vec<(u64, T)>,
}

#[derive(Serialize, Deserialize)]
struct SubPolicyRecord<T> {
    default: T,
    #[serde(default = "Vec::new")]
    thresholds: Vec<(u64, T)>,
}

impl<T> TryFrom<SubPolicyRecord<T>> for SubPolicy<T> {
    type Error = PolicyConfigError;

    fn try_from(record: SubPolicyRecord<T>) -> Result<Self, Self::Error> {
        Self::from_parts(record.default, record.thresholds)
    }
}

impl<T> From<SubPolicy<T>> for SubPolicyRecord<T> {
    fn from(policy: SubPolicy<T>) -> Self {
        Self {
            default: policy.default,
            thresholds: policy.thresholds,
        }
    }
}

impl<T> SubPolicy<T> {
    /// A constant policy.
    pub fn new(default: T) -> Self {
        Self {
            default,
            thresholds: Vec::new(),
        }
    }

    /// Build from a default and thresholds in strictly ascending order.
    pub fn from_parts(default: T, thresholds: Vec<(u64, T)>) -> ConfigResult<Self> {
        if let Some(pair) = thresholds.windows(2).find(|w| w[0].0 >= w[1].0) {
            return Err(PolicyConfigError::InvalidPolicyConfig(format!(
                "threshold {} does not follow {}",
                pair[1].0, pair[0].0
            )));
        }
        Ok(Self {
            default,
            thresholds,
        })
    }

    /// Append a threshold after all existing ones.
    pub fn with_threshold(mut self, index: u64, value: T) -> ConfigResult<Self> {
        if let Some((last, _)) = self.thresholds.last() {
            if index <= *last {
                return Err(PolicyConfigError::InvalidPolicyConfig(format!(
                    "threshold {index} does not follow {last}"
                )));
            }
        }
        self.thresholds.push((index, value));
        Ok(self)
    }

    /// The value in force at block `index`.
    pub fn value_at(&self, index: u64) -> &T {
        let applicable = self.thresholds.partition_point(|(threshold, _)| *threshold <= index);
        match applicable.checked_sub(1) {
            Some(position) => &self.thresholds[position].1,
            None => &self.default,
        }
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// Threshold indices, ascending.
    pub fn threshold_indices(&self) -> impl Iterator<Item = u64> + '_ {
        self.thresholds.iter().map(|(index, _)| *index)
    }
}
