//! # Staking Flow
//!
//! Blocks carrying staking actions go through the policy check, are applied
//! by the staking service, and the next validator set is ranked from the
//! resulting state.
//!
//! ```text
//! propose ──► BlockPolicyEnforcer ──► StakingService ──► ValidatorSetSelector
//!                  (reject)              (outcomes)          (height + 1)
//! ```

#[cfg(test)]
mod tests {
    use crate::fixtures::{staking_tx, ChainError, TestChain, PROTOCOL_V2_INDEX};
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use sc_01_state_access::StateReader;
    use sc_02_delegation::{bonded_pool_address, StakingAction, StakingEffect, StakingError};
    use sc_03_validator_set::ValidatorSetConfig;
    use sc_04_block_policy::{
        store_admin_state, AdminState, BlockPolicyConfig, PolicyViolation,
    };
    use shared_types::testing::public_key_from_seed;
    use shared_types::{Address, PublicKey};

    const FUNDING: u128 = 1_000;

    fn validator(seed: u8) -> (PublicKey, Address) {
        let key = public_key_from_seed(seed);
        (key, key.address())
    }

    fn promote(public_key: PublicKey, amount: u128) -> StakingAction {
        StakingAction::PromoteValidator { public_key, amount }
    }

    fn balance(chain: &TestChain, address: &Address) -> u128 {
        let token = &chain.staking.registry().assets().consensus_token;
        chain.state.get_balance(address, token).unwrap().raw
    }

    #[test]
    fn test_promote_delegate_undelegate() {
        let mut chain = TestChain::with_defaults().unwrap();
        let (alice_key, alice) = validator(1);
        let bob = [0xB0; 20];
        chain.fund(&alice, FUNDING).unwrap();
        chain.fund(&bob, FUNDING).unwrap();

        // Block 1: Alice becomes a validator
        let block = chain.propose(vec![staking_tx(alice, &[promote(alice_key, 100)])]);
        let committed = chain.commit(&block).unwrap();
        assert_eq!(
            committed.outcomes[0].result,
            Ok(StakingEffect::Bonded {
                validator: alice,
                principal: 100,
                shares: 100,
                created: true,
            })
        );
        assert_eq!(committed.next_set.height, 2);
        assert_eq!(committed.next_set.get(&alice).unwrap().stake_weight, 100);

        // Block 2: Bob delegates at the 1:1 rate
        let delegate = StakingAction::Delegate {
            validator: alice,
            amount: 50,
        };
        let committed = chain.commit(&chain.propose(vec![staking_tx(bob, &[delegate])])).unwrap();
        assert!(committed.outcomes[0].is_success());
        assert_eq!(committed.next_set.total_stake, 150);
        assert_eq!(
            chain
                .staking
                .registry()
                .delegation(&chain.state, &bob, &alice)
                .unwrap()
                .shares
                .raw,
            50
        );

        // Block 3: Bob redeems all his shares
        let undelegate = StakingAction::Undelegate {
            validator: alice,
            shares: 50,
        };
        let committed = chain.commit(&chain.propose(vec![staking_tx(bob, &[undelegate])])).unwrap();
        assert_eq!(
            committed.outcomes[0].result,
            Ok(StakingEffect::Unbonded {
                validator: alice,
                shares: 50,
                principal: 50,
            })
        );
        assert_eq!(balance(&chain, &bob), FUNDING);
        assert_eq!(balance(&chain, &bonded_pool_address(&alice)), 100);
        assert_eq!(committed.next_set.get(&alice).unwrap().stake_weight, 100);
    }

    #[test]
    fn test_failed_action_does_not_abort_block() {
        let mut chain = TestChain::with_defaults().unwrap();
        let (alice_key, alice) = validator(1);
        let bob = [0xB0; 20];
        chain.fund(&alice, FUNDING).unwrap();
        chain.fund(&bob, FUNDING).unwrap();

        let unknown = [0xEE; 20];
        let block = chain.propose(vec![
            staking_tx(
                bob,
                &[StakingAction::Delegate {
                    validator: unknown,
                    amount: 10,
                }],
            ),
            staking_tx(alice, &[promote(alice_key, 100)]),
        ]);
        let committed = chain.commit(&block).unwrap();

        assert_eq!(committed.outcomes.len(), 2);
        assert_eq!(
            committed.outcomes[0].result,
            Err(StakingError::UnknownValidator(unknown))
        );
        assert!(committed.outcomes[1].is_success());
        assert_eq!(balance(&chain, &bob), FUNDING);
        assert!(committed.next_set.contains(&alice));
    }

    #[test]
    fn test_promote_with_foreign_key_rejected() {
        let mut chain = TestChain::with_defaults().unwrap();
        let (carol_key, carol) = validator(3);
        let mallory = [0x66; 20];
        chain.fund(&mallory, FUNDING).unwrap();

        let block = chain.propose(vec![staking_tx(mallory, &[promote(carol_key, 100)])]);
        let committed = chain.commit(&block).unwrap();

        assert_eq!(
            committed.outcomes[0].result,
            Err(StakingError::ForeignValidatorKey {
                signer: mallory,
                validator: carol,
            })
        );
        assert!(committed.next_set.is_empty());
        assert_eq!(balance(&chain, &mallory), FUNDING);
    }

    #[test]
    fn test_validator_set_capped_and_ranked() {
        let mut chain = TestChain::new(
            BlockPolicyConfig::default(),
            ValidatorSetConfig { max_validators: 2 },
        )
        .unwrap();

        let mut txs = Vec::new();
        for (seed, stake) in [(1u8, 300u128), (2, 100), (3, 200)] {
            let (key, address) = validator(seed);
            chain.fund(&address, FUNDING).unwrap();
            txs.push(staking_tx(address, &[promote(key, stake)]));
        }
        let committed = chain.commit(&chain.propose(txs)).unwrap();

        let set = committed.next_set;
        assert_eq!(set.len(), 2);
        assert_eq!(set.rank(&validator(1).1), Some(0));
        assert_eq!(set.rank(&validator(3).1), Some(1));
        assert!(!set.contains(&validator(2).1));
        assert_eq!(set.total_stake, 500);
    }

    #[test]
    fn test_redelegate_until_obsolete() {
        let mut chain = TestChain::with_defaults().unwrap();
        let (alice_key, alice) = validator(1);
        let (carol_key, carol) = validator(3);
        let bob = [0xB0; 20];
        for address in [alice, carol, bob] {
            chain.fund(&address, FUNDING).unwrap();
        }

        let setup = chain.propose(vec![
            staking_tx(alice, &[promote(alice_key, 100)]),
            staking_tx(carol, &[promote(carol_key, 100)]),
            staking_tx(
                bob,
                &[StakingAction::Delegate {
                    validator: alice,
                    amount: 100,
                }],
            ),
        ]);
        chain.commit(&setup).unwrap();

        let redelegate = StakingAction::Redelegate {
            src: alice,
            dst: carol,
            shares: 10,
        };

        // Accepted through the grace window after the type goes obsolete
        chain.height = PROTOCOL_V2_INDEX - 2;
        for _ in 0..3 {
            let block = chain.propose(vec![staking_tx(bob, &[redelegate.clone()])]);
            let committed = chain.commit(&block).unwrap();
            assert!(committed.outcomes[0].is_success());
        }
        assert_eq!(chain.height, PROTOCOL_V2_INDEX + 1);
        assert_eq!(balance(&chain, &bonded_pool_address(&carol)), 130);

        let block = chain.propose(vec![staking_tx(bob, &[redelegate])]);
        match chain.commit(&block) {
            Err(ChainError::Rejected(violations)) => assert_eq!(
                violations,
                vec![PolicyViolation::ObsoleteActionUsed {
                    type_id: "redelegate_validator".to_string(),
                    obsolete_from: PROTOCOL_V2_INDEX,
                    index: PROTOCOL_V2_INDEX + 2,
                }]
            ),
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(chain.height, PROTOCOL_V2_INDEX + 1);
    }

    #[test]
    fn test_promote_requires_admin_after_upgrade() {
        let mut chain = TestChain::with_defaults().unwrap();
        let (alice_key, alice) = validator(1);
        chain.fund(&alice, FUNDING).unwrap();
        chain.height = PROTOCOL_V2_INDEX;

        let block = chain.propose(vec![staking_tx(alice, &[promote(alice_key, 100)])]);
        assert!(matches!(
            chain.commit(&block),
            Err(ChainError::Rejected(v)) if v == vec![PolicyViolation::UnauthorizedAdminAction {
                signer: alice,
                type_id: "promote_validator".to_string(),
            }]
        ));

        store_admin_state(&mut chain.state, &AdminState::new(alice, PROTOCOL_V2_INDEX + 10)).unwrap();
        let committed = chain.commit(&block).unwrap();
        assert!(committed.outcomes[0].is_success());
        assert!(committed.next_set.contains(&alice));
    }

    #[test]
    fn test_random_activity_conserves_supply() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut chain = TestChain::with_defaults().unwrap();

        let validators: Vec<(PublicKey, Address)> = (1..=3).map(validator).collect();
        let delegators: Vec<Address> = (0..4u8).map(|i| [0xD0 + i; 20]).collect();
        for (_, address) in &validators {
            chain.fund(address, FUNDING).unwrap();
        }
        for address in &delegators {
            chain.fund(address, FUNDING).unwrap();
        }
        let funded = FUNDING * (validators.len() + delegators.len()) as u128;

        let promotions = validators
            .iter()
            .map(|(key, address)| staking_tx(*address, &[promote(*key, 10)]))
            .collect();
        chain.commit(&chain.propose(promotions)).unwrap();

        for _ in 0..20 {
            let txs = delegators
                .iter()
                .map(|delegator| {
                    let target = validators[rng.gen_range(0..validators.len())].1;
                    let action = if rng.gen_bool(0.6) {
                        StakingAction::Delegate {
                            validator: target,
                            amount: rng.gen_range(1..50),
                        }
                    } else {
                        StakingAction::Undelegate {
                            validator: target,
                            shares: rng.gen_range(1..50),
                        }
                    };
                    staking_tx(*delegator, &[action])
                })
                .collect();
            let committed = chain.commit(&chain.propose(txs)).unwrap();

            let token = &chain.staking.registry().assets().consensus_token;
            assert_eq!(chain.state.total_supply(token), funded);

            let bonded: u128 = validators
                .iter()
                .map(|(_, address)| balance(&chain, &bonded_pool_address(address)))
                .sum();
            assert_eq!(committed.next_set.total_stake, bonded);
        }
    }
}
