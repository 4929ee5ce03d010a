//! Root-parallel search.
//!
//! Each worker grows an independent tree from the same root with its own
//! derived seed. Root expansion is deterministic, so child `i` is the same
//! trade in every tree and statistics can be summed per child index.

use std::thread;

use league_core::{LeagueState, Negotiation, TeamId, TradeAction};
use tracing::{debug, info};

use crate::config::MctsConfig;
use crate::policy::RolloutPolicy;
use crate::search::{SearchError, SearchResult, TradeSearch};
use crate::tree::{first_max, ChildStats, TreeStats};

/// Per-worker seed. Worker 0 keeps the configured seed so a one-thread run
/// matches sequential search.
pub fn worker_seed(seed: u64, worker: usize) -> u64 {
    seed.wrapping_add((worker as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

struct WorkerOutput {
    actions: Vec<TradeAction>,
    children: Vec<ChildStats>,
    stats: TreeStats,
    iterations: u32,
    baseline: f64,
}

/// Run `config.threads` independent searches of `config.iterations` each on
/// scoped threads and pick the best root trade from the summed statistics.
pub fn search_root_parallel<P: RolloutPolicy + ?Sized>(
    state: &LeagueState,
    focal: &TeamId,
    negotiation: &Negotiation,
    policy: &P,
    config: MctsConfig,
) -> Result<SearchResult, SearchError> {
    config.validate()?;
    let threads = config.threads;
    debug!(focal = %focal, threads, iterations = config.iterations, "Starting root-parallel search");

    let outputs: Vec<Result<WorkerOutput, SearchError>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|worker| {
                let config = config.clone().with_seed(worker_seed(config.seed, worker));
                scope.spawn(move || -> Result<WorkerOutput, SearchError> {
                    let iterations = config.iterations;
                    let mut search = TradeSearch::new(state, focal, negotiation, policy, config)?;
                    let done = search.explore(iterations)?;
                    let tree = search.tree();
                    Ok(WorkerOutput {
                        actions: tree
                            .get(tree.root())
                            .children
                            .iter()
                            .filter_map(|&id| tree.get(id).action.clone())
                            .collect(),
                        children: tree.root_child_stats(),
                        stats: tree.stats(),
                        iterations: done,
                        baseline: search.focal().utility(&tree.get(tree.root()).state),
                    })
                })
            })
            .collect();

        handles
            .into_iter()
            .enumerate()
            .map(|(worker, handle)| {
                handle
                    .join()
                    .unwrap_or(Err(SearchError::WorkerPanicked(worker)))
            })
            .collect()
    });

    let mut merged: Option<WorkerOutput> = None;
    for output in outputs {
        let output = output?;
        match merged.as_mut() {
            None => merged = Some(output),
            Some(total) => {
                debug_assert_eq!(total.actions, output.actions, "root expansion diverged");
                for (sum, child) in total.children.iter_mut().zip(output.children) {
                    sum.merge(child);
                }
                total.stats.total_nodes += output.stats.total_nodes;
                total.stats.root_value = (total.stats.root_value * total.stats.root_visits as f64
                    + output.stats.root_value * output.stats.root_visits as f64)
                    / (total.stats.root_visits + output.stats.root_visits).max(1) as f64;
                total.stats.root_visits += output.stats.root_visits;
                total.stats.max_depth = total.stats.max_depth.max(output.stats.max_depth);
                total.iterations += output.iterations;
            }
        }
    }
    let total = merged.ok_or_else(|| SearchError::NoTradeFound(focal.clone()))?;

    let visited = (0..total.children.len()).filter(|&i| total.children[i].visits > 0);
    let best = first_max(visited, |i| total.children[i].exploitation(config.epsilon))
        .ok_or_else(|| SearchError::NoTradeFound(focal.clone()))?;
    let child = total.children[best];

    let result = SearchResult {
        focal: focal.clone(),
        action: total.actions[best].clone(),
        expected_reward: child.mean_reward(),
        baseline: total.baseline,
        visits: child.visits,
        iterations: total.iterations,
        tree: total.stats,
    };
    info!(
        focal = %result.focal,
        action = %result.action,
        expected_reward = result.expected_reward,
        visits = result.visits,
        threads,
        "Root-parallel search complete"
    );
    Ok(result)
}
