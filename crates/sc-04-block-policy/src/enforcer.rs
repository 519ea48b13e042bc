//! # Block Policy Enforcer
//!
//! Stateless admission rules for blocks and transactions at a height. Every
//! check is a pure function of the configuration, the action type loader and
//! a read-only state snapshot, so all nodes reach the same verdict.
//!
//! ## Rules
//!
//! | Rule              | Scope       | Violation                  |
//! |-------------------|-------------|----------------------------|
//! | Size              | block, tx   | `BlockSizeExceeded`        |
//! | Count             | block       | `TxCountOutOfRange`        |
//! | Per-signer count  | block       | `TxCountPerSignerExceeded` |
//! | Obsolete action   | tx          | `ObsoleteActionUsed`       |
//! | Admin-only action | tx          | `UnauthorizedAdminAction`  |
//!
//! An action type marked obsolete from `N` is still accepted at `N` and
//! `N + 1` and rejected from `N + 2` on. When `N + 2` overflows the type is
//! never rejected. Action tags the loader cannot resolve are not policed here.
//!
//! Inside `validate` the per-transaction size check is subsumed by the block
//! size rule, so an oversized transaction is reported once.

use crate::config::BlockPolicyConfig;
use crate::domain::{load_admin_state, AdminState, CountBound, PolicyViolation};
use sc_01_state_access::StateReader;
use shared_types::{format_address, ActionTypeLoader, Address, Block, Transaction};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Blocks past an obsolete-from index during which the type is still accepted.
const OBSOLETE_GRACE_BLOCKS: u64 = 2;

pub struct BlockPolicyEnforcer {
    config: Arc<BlockPolicyConfig>,
    action_types: Arc<dyn ActionTypeLoader>,
}

impl BlockPolicyEnforcer {
    pub fn new(config: Arc<BlockPolicyConfig>, action_types: Arc<dyn ActionTypeLoader>) -> Self {
        Self {
            config,
            action_types,
        }
    }

    pub fn config(&self) -> &BlockPolicyConfig {
        &self.config
    }

    /// Check a single transaction for inclusion at `index`.
    ///
    /// Returns the first violation found.
    pub fn validate_tx<S>(&self, state: &S, tx: &Transaction, index: u64) -> Option<PolicyViolation>
    where
        S: StateReader + ?Sized,
    {
        let limit = *self.config.max_tx_bytes.value_at(index);
        if tx.byte_length > limit {
            return Some(PolicyViolation::BlockSizeExceeded {
                actual: u128::from(tx.byte_length),
                limit,
            });
        }
        self.check_actions(state, tx, index)
    }

    /// Obsolete and admin rules for the actions of `tx`.
    fn check_actions<S>(&self, state: &S, tx: &Transaction, index: u64) -> Option<PolicyViolation>
    where
        S: StateReader + ?Sized,
    {
        // Loaded at most once per transaction, and only when needed
        let mut admin: Option<Option<AdminState>> = None;

        for raw in &tx.actions {
            let Some(type_id) = raw.type_id() else {
                continue;
            };
            let Some(info) = self.action_types.resolve(type_id, index) else {
                continue;
            };

            // A cutover past u64::MAX is never reached
            let cutover = info
                .obsolete_from
                .and_then(|from| from.checked_add(OBSOLETE_GRACE_BLOCKS).map(|at| (from, at)));
            if let Some((obsolete_from, at)) = cutover {
                if index >= at {
                    return Some(PolicyViolation::ObsoleteActionUsed {
                        type_id: info.type_id.clone(),
                        obsolete_from,
                        index,
                    });
                }
            }

            if info.admin_only {
                let current = match admin {
                    Some(loaded) => loaded,
                    None => match load_admin_state(state) {
                        Ok(loaded) => {
                            admin = Some(loaded);
                            loaded
                        }
                        Err(violation) => return Some(violation),
                    },
                };
                let authorized = current.is_some_and(|a| a.authorizes(&tx.signer, index));
                if !authorized {
                    return Some(PolicyViolation::UnauthorizedAdminAction {
                        signer: tx.signer,
                        type_id: info.type_id.clone(),
                    });
                }
            }
        }

        None
    }

    /// Check a whole block. Block-level rules are reported first, then
    /// per-transaction rules in transaction order.
    pub fn validate<S>(&self, state: &S, block: &Block) -> Vec<PolicyViolation>
    where
        S: StateReader + ?Sized,
    {
        let index = block.index;
        let mut violations = Vec::new();

        let limit = *self.config.max_tx_bytes.value_at(index);
        let actual = block.total_tx_bytes();
        if actual > u128::from(limit) {
            violations.push(PolicyViolation::BlockSizeExceeded { actual, limit });
        }

        violations.extend(self.check_count(block));
        violations.extend(self.check_per_signer(block));

        // The block size rule already covers any single oversized transaction
        for tx in &block.transactions {
            if let Some(violation) = self.check_actions(state, tx, index) {
                violations.push(violation);
            }
        }

        if violations.is_empty() {
            debug!(block_index = index, txs = block.transactions.len(), "Block accepted by policy");
        } else {
            warn!(
                block_index = index,
                violations = violations.len(),
                first = %violations[0],
                "Block rejected by policy"
            );
        }
        violations
    }

    fn check_count(&self, block: &Block) -> Option<PolicyViolation> {
        let index = block.index;
        let actual = block.transactions.len();
        let count = actual as u64;

        let min = *self.config.min_tx_per_block.value_at(index);
        if count < min {
            return Some(PolicyViolation::TxCountOutOfRange {
                actual,
                bound: min,
                direction: CountBound::Min,
            });
        }
        let max = *self.config.max_tx_per_block.value_at(index);
        if count > max {
            return Some(PolicyViolation::TxCountOutOfRange {
                actual,
                bound: max,
                direction: CountBound::Max,
            });
        }
        None
    }

    /// The first signer, in block transaction order, over the limit.
    fn check_per_signer(&self, block: &Block) -> Option<PolicyViolation> {
        let limit = *self.config.max_tx_per_signer_per_block.value_at(block.index);

        let mut counts: HashMap<Address, usize> = HashMap::new();
        for tx in &block.transactions {
            *counts.entry(tx.signer).or_default() += 1;
        }

        block.transactions.iter().find_map(|tx| {
            let actual = counts[&tx.signer];
            (actual as u64 > limit).then(|| {
                debug!(signer = %format_address(&tx.signer), actual, limit, "Signer over per-block limit");
                PolicyViolation::TxCountPerSignerExceeded {
                    signer: tx.signer,
                    actual,
                    limit,
                }
            })
        })
    }
}
