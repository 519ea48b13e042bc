//! # Stake-Core Benchmarks
//!
//! | Crate | Operation | Target |
//! |-------|-----------|--------|
//! | sc-04 Block Policy | Validate a full block | < 1ms |
//! | sc-04 Block Policy | Cached config load | < 10µs |
//! | sc-03 Validator Set | Rank 250 validators | < 100µs |
//! | sc-02 Delegation | Registry snapshot | < 10ms |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use std::time::Duration;

use sc_01_state_access::LookupPool;
use sc_02_delegation::{StakingAction, Validator, ValidatorStake};
use sc_04_block_policy::{store_policy_config, BlockPolicyConfig, PolicyLoader, SubPolicy};
use sc_tests::fixtures::{filler_tx, staking_tx, TestChain};
use shared_types::testing::public_key_from_seed;

// ============================================================================
// SC-04: Block Policy
// ============================================================================

fn bench_block_policy(c: &mut Criterion) {
    let mut group = c.benchmark_group("sc-04-block-policy");
    group.measurement_time(Duration::from_secs(5));

    let chain = TestChain::with_defaults().expect("chain");
    for size in [10usize, 50, 100] {
        let txs = (0..size)
            .map(|i| {
                let signer = [(i / 4) as u8; 20];
                if i % 2 == 0 {
                    filler_tx(signer, 512)
                } else {
                    staking_tx(
                        signer,
                        &[StakingAction::Delegate {
                            validator: [0xAA; 20],
                            amount: 10,
                        }],
                    )
                }
            })
            .collect();
        let block = chain.propose(txs);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("validate_block", size), &block, |b, block| {
            b.iter(|| black_box(chain.enforcer.validate(&chain.state, block)))
        });
    }

    let mut chain = TestChain::with_defaults().expect("chain");
    let config = BlockPolicyConfig {
        max_tx_bytes: SubPolicy::from_parts(100 * 1024, vec![(1_000, 200 * 1024)])
            .expect("ascending thresholds"),
        ..BlockPolicyConfig::default()
    };
    store_policy_config(&mut chain.state, &config).expect("store config");
    let loader = PolicyLoader::default();

    group.bench_function("load_config_cached", |b| {
        b.iter(|| black_box(loader.load(&chain.state).expect("load")))
    });
    group.bench_function("load_config_cold", |b| {
        b.iter(|| black_box(PolicyLoader::default().load(&chain.state).expect("load")))
    });

    group.finish();
}

// ============================================================================
// SC-03: Validator Set
// ============================================================================

fn bench_validator_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("sc-03-validator-set");
    let chain = TestChain::with_defaults().expect("chain");
    let mut rng = rand::thread_rng();

    for count in [10u8, 100, 250] {
        let snapshot: Vec<ValidatorStake> = (1..=count)
            .map(|seed| ValidatorStake {
                validator: Validator::new(public_key_from_seed(seed)),
                bonded: rng.gen_range(0..1_000_000),
            })
            .collect();

        group.throughput(Throughput::Elements(u64::from(count)));
        group.bench_with_input(BenchmarkId::new("select", count), &snapshot, |b, snapshot| {
            b.iter(|| black_box(chain.selector.select(1, snapshot)))
        });
    }

    group.finish();
}

// ============================================================================
// SC-02: Delegation Registry
// ============================================================================

fn bench_registry_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("sc-02-delegation");
    group.measurement_time(Duration::from_secs(5));

    let mut chain = TestChain::with_defaults().expect("chain");
    let txs = (1..=100u8)
        .map(|seed| {
            let key = public_key_from_seed(seed);
            chain.fund(&key.address(), 1_000).expect("fund");
            staking_tx(
                key.address(),
                &[StakingAction::PromoteValidator {
                    public_key: key,
                    amount: u128::from(seed) * 10,
                }],
            )
        })
        .collect();
    chain.commit(&chain.propose(txs)).expect("commit");

    for workers in [1usize, 4, 8] {
        let pool = LookupPool::new(workers).expect("pool");
        group.bench_with_input(BenchmarkId::new("snapshot", workers), &pool, |b, pool| {
            b.iter(|| {
                black_box(
                    chain
                        .staking
                        .registry()
                        .snapshot(&chain.state, pool)
                        .expect("snapshot"),
                )
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_block_policy,
    bench_validator_set,
    bench_registry_snapshot,
);

criterion_main!(benches);
