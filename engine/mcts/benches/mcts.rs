//! MCTS benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full trade search with varying iteration counts
//! - Greedy vs random rollouts
//! - Tree operations (selection, backpropagation)
//! - Root-parallel search across thread counts

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use league_core::{fixtures, TeamId, TradeAction};
use mcts::{
    run_search, ExpansionPolicy, GreedyPolicy, MctsConfig, MctsTree, RandomPolicy, TradeSearch,
};

fn focal() -> TeamId {
    TeamId::from("BUF")
}

// =============================================================================
// Full Search Benchmarks
// =============================================================================

fn bench_search_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("trade_search_iterations");
    let (state, negotiation) = fixtures::market();

    for iterations in [50u32, 100, 200, 400, 800] {
        group.throughput(Throughput::Elements(iterations as u64));
        group.bench_with_input(
            BenchmarkId::new("market", iterations),
            &iterations,
            |b, &iterations| {
                let config = MctsConfig::default().with_iterations(iterations);
                b.iter(|| {
                    black_box(run_search(&state, &focal(), &negotiation, config.clone()).unwrap())
                });
            },
        );
    }

    group.finish();
}

fn bench_rollout_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("trade_search_rollouts");
    let (state, negotiation) = fixtures::market();
    let config = MctsConfig::for_testing().with_iterations(200);

    group.bench_function("greedy", |b| {
        b.iter(|| {
            let mut search =
                TradeSearch::new(&state, &focal(), &negotiation, &GreedyPolicy, config.clone())
                    .unwrap();
            black_box(search.run().unwrap())
        });
    });

    group.bench_function("random", |b| {
        let config = config.clone().with_expansion(ExpansionPolicy::Random);
        b.iter(|| {
            let mut search =
                TradeSearch::new(&state, &focal(), &negotiation, &RandomPolicy, config.clone())
                    .unwrap();
            black_box(search.run().unwrap())
        });
    });

    group.finish();
}

// =============================================================================
// Tree Operation Benchmarks
// =============================================================================

fn bench_tree_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_tree_ops");
    let state = fixtures::market_league();
    let action = TradeAction::for_cash("NYJ", "BUF", "j_rb", 0.0);

    // Children share the registry through Arc, so this mostly measures the
    // per-team book copies.
    group.bench_function("add_child", |b| {
        b.iter(|| {
            let mut tree = MctsTree::new(state.clone());
            let root = tree.root();
            for _ in 0..100 {
                tree.add_child(root, action.clone(), state.clone());
            }
            black_box(tree.len())
        });
    });

    group.bench_function("select_child", |b| {
        let mut tree = MctsTree::new(state.clone());
        let root = tree.root();
        for i in 0..20u32 {
            let child = tree.add_child(root, action.clone(), state.clone());
            for _ in 0..=i {
                tree.backpropagate(child, i as f64 * 0.1);
            }
        }
        tree.get_mut(root).is_expanded = true;

        b.iter(|| black_box(tree.select_child(root, 1.41, 1e-6)));
    });

    group.bench_function("backpropagate_depth_5", |b| {
        b.iter_batched(
            || {
                let mut tree = MctsTree::new(state.clone());
                let mut parent = tree.root();
                for _ in 0..5 {
                    parent = tree.add_child(parent, action.clone(), state.clone());
                }
                (tree, parent)
            },
            |(mut tree, leaf)| {
                tree.backpropagate(leaf, 1.0);
                black_box(tree)
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// =============================================================================
// Root-Parallel Benchmarks
// =============================================================================

fn bench_root_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("trade_search_threads");
    let (state, negotiation) = fixtures::market();

    for threads in [1usize, 2, 4] {
        group.bench_with_input(BenchmarkId::new("market", threads), &threads, |b, &threads| {
            let config = MctsConfig::default()
                .with_iterations(400)
                .with_threads(threads);
            b.iter(|| {
                black_box(run_search(&state, &focal(), &negotiation, config.clone()).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_search_iterations,
    bench_rollout_policies,
    bench_tree_operations,
    bench_root_parallel,
);

criterion_main!(benches);
