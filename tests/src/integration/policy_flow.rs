//! # Policy Flow
//!
//! Block policy read from chain state and enforced ahead of execution. A
//! rejected block never reaches the staking service.

#[cfg(test)]
mod tests {
    use crate::fixtures::{filler_tx, staking_tx, ChainError, TestChain};
    use proptest::prelude::*;
    use sc_02_delegation::StakingAction;
    use sc_03_validator_set::ValidatorSetConfig;
    use sc_04_block_policy::{
        store_policy_config, BlockPolicyConfig, CountBound, PolicyLoader, PolicyViolation,
        SubPolicy,
    };
    use shared_types::testing::public_key_from_seed;
    use shared_types::{RawAction, Transaction};
    use std::sync::Arc;

    fn rejected(result: Result<crate::fixtures::Committed, ChainError>) -> Vec<PolicyViolation> {
        match result {
            Err(ChainError::Rejected(violations)) => violations,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    fn chain_with(policy: BlockPolicyConfig) -> TestChain {
        TestChain::new(policy, ValidatorSetConfig::default()).unwrap()
    }

    #[test]
    fn test_stored_policy_thresholds_apply() {
        let mut chain = TestChain::with_defaults().unwrap();
        let policy = BlockPolicyConfig {
            max_tx_bytes: SubPolicy::from_parts(1_000, vec![(10, 500)]).unwrap(),
            ..BlockPolicyConfig::default()
        };
        store_policy_config(&mut chain.state, &policy).unwrap();

        let loader = PolicyLoader::default();
        let loaded = loader.load(&chain.state).unwrap();
        assert_eq!(*loaded, policy);
        chain.enforcer = sc_04_block_policy::BlockPolicyEnforcer::new(
            loaded,
            Arc::new(crate::fixtures::chain_action_types()),
        );

        let signer = [0x11; 20];
        let txs = vec![filler_tx(signer, 300), filler_tx(signer, 300)];

        chain.height = 8;
        assert!(chain.commit(&chain.propose(txs.clone())).is_ok());

        let violations = rejected(chain.commit(&chain.propose(txs)));
        assert_eq!(
            violations,
            vec![PolicyViolation::BlockSizeExceeded {
                actual: 600,
                limit: 500,
            }]
        );
        assert_eq!(chain.height, 9);

        // The second load is served from the cache
        loader.load(&chain.state).unwrap();
        assert_eq!(loader.cache_stats().hits, 1);
    }

    #[test]
    fn test_empty_block_below_minimum() {
        let mut chain = chain_with(BlockPolicyConfig {
            min_tx_per_block: SubPolicy::new(1),
            ..BlockPolicyConfig::default()
        });

        let violations = rejected(chain.commit(&chain.propose(Vec::new())));
        assert_eq!(
            violations,
            vec![PolicyViolation::TxCountOutOfRange {
                actual: 0,
                bound: 1,
                direction: CountBound::Min,
            }]
        );
    }

    #[test]
    fn test_violations_reported_in_rule_order() {
        let mut chain = chain_with(BlockPolicyConfig {
            max_tx_bytes: SubPolicy::new(1_000),
            max_tx_per_block: SubPolicy::new(5),
            ..BlockPolicyConfig::default()
        });
        let spammer = [0x22; 20];
        let mut txs: Vec<Transaction> = (0..5).map(|_| filler_tx(spammer, 10)).collect();
        txs.push(filler_tx([0x33; 20], 1_200));

        let violations = rejected(chain.commit(&chain.propose(txs)));
        assert_eq!(
            violations,
            vec![
                PolicyViolation::BlockSizeExceeded {
                    actual: 1_250,
                    limit: 1_000,
                },
                PolicyViolation::TxCountOutOfRange {
                    actual: 6,
                    bound: 5,
                    direction: CountBound::Max,
                },
                PolicyViolation::TxCountPerSignerExceeded {
                    signer: spammer,
                    actual: 5,
                    limit: 4,
                },
            ]
        );
    }

    #[test]
    fn test_rejected_block_leaves_state_untouched() {
        let mut chain = chain_with(BlockPolicyConfig {
            max_tx_per_signer_per_block: SubPolicy::new(1),
            ..BlockPolicyConfig::default()
        });
        let key = public_key_from_seed(1);
        let alice = key.address();
        chain.fund(&alice, 1_000).unwrap();
        let before = chain.state.clone();

        let promote = StakingAction::PromoteValidator {
            public_key: key,
            amount: 100,
        };
        let block = chain.propose(vec![
            staking_tx(alice, &[promote.clone()]),
            staking_tx(alice, &[promote]),
        ]);
        rejected(chain.commit(&block));

        assert_eq!(chain.state.state_count(), before.state_count());
        assert!(chain
            .staking
            .registry()
            .validator_addresses(&chain.state)
            .unwrap()
            .is_empty());
        assert_eq!(chain.height, 0);
    }

    #[test]
    fn test_foreign_action_types_pass_through() {
        let mut chain = TestChain::with_defaults().unwrap();
        let signer = [0x44; 20];
        let tx = Transaction::new(
            signer,
            vec![RawAction::new("transfer_asset", serde_json::json!({ "amount": "5" }))],
            64,
        );

        let committed = chain.commit(&chain.propose(vec![tx])).unwrap();
        assert!(committed.outcomes.is_empty());
        assert!(committed.next_set.is_empty());
    }

    proptest! {
        #[test]
        fn prop_per_signer_limit_is_exact(per_signer in 0usize..10, others in 0usize..4) {
            let chain = TestChain::with_defaults().unwrap();
            let signer = [0x55; 20];
            let mut txs: Vec<Transaction> = (0..per_signer).map(|_| filler_tx(signer, 1)).collect();
            txs.extend((0..others).map(|i| filler_tx([i as u8; 20], 1)));
            let block = chain.propose(txs);

            let violations = chain.enforcer.validate(&chain.state, &block);
            let expected = (per_signer > 4).then_some(PolicyViolation::TxCountPerSignerExceeded {
                signer,
                actual: per_signer,
                limit: 4,
            });
            prop_assert_eq!(violations.into_iter().next(), expected);
        }
    }
}
