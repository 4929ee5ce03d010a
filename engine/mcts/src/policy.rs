//! Rollout policies for the simulation phase.
//!
//! A rollout repeatedly lets the active team play one admissible trade until
//! the state is terminal, nobody will sign anything, or the depth cap is hit.
//! The reward is the focal team's utility in the final state.

use league_core::{Agent, Candidate, LeagueState, Negotiation};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use tracing::trace;

use crate::search::SearchError;

/// Picks the next trade during a rollout.
pub trait RolloutPolicy: Send + Sync {
    /// Index into `candidates` of the trade to play. `candidates` is never
    /// empty and keeps admissible-action order.
    fn choose(
        &self,
        focal: &Agent,
        state: &LeagueState,
        candidates: &[Candidate],
        rng: &mut ChaCha20Rng,
    ) -> usize;

    fn name(&self) -> &'static str;
}

/// Plays the trade that most improves the focal team. Ties go to the first
/// candidate, so greedy rollouts never touch the RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPolicy;

impl RolloutPolicy for GreedyPolicy {
    fn choose(
        &self,
        focal: &Agent,
        state: &LeagueState,
        candidates: &[Candidate],
        _rng: &mut ChaCha20Rng,
    ) -> usize {
        let mut best = 0;
        let mut best_delta = f64::NEG_INFINITY;
        for (i, candidate) in candidates.iter().enumerate() {
            let delta = focal.delta_utility(state, &candidate.appraisal.state);
            if delta > best_delta {
                best = i;
                best_delta = delta;
            }
        }
        best
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

/// Uniform choice among admissible trades.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPolicy;

impl RolloutPolicy for RandomPolicy {
    fn choose(
        &self,
        _focal: &Agent,
        _state: &LeagueState,
        candidates: &[Candidate],
        rng: &mut ChaCha20Rng,
    ) -> usize {
        rng.gen_range(0..candidates.len())
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Play `policy` forward from `state` for at most `max_depth` trades and
/// return the focal utility of the state it stops in.
pub fn rollout<P: RolloutPolicy + ?Sized>(
    state: &LeagueState,
    negotiation: &Negotiation,
    focal: &Agent,
    policy: &P,
    max_depth: u32,
    rng: &mut ChaCha20Rng,
) -> Result<f64, SearchError> {
    let mut current = state.clone();
    let mut played = 0;
    while played < max_depth && !current.is_terminal() {
        let mut candidates = negotiation.admissible_actions(&current, current.active_team())?;
        if candidates.is_empty() {
            break;
        }
        let pick = policy.choose(focal, &current, &candidates, rng);
        current = candidates.swap_remove(pick).appraisal.state;
        played += 1;
    }
    let reward = focal.utility(&current);
    trace!(policy = policy.name(), played, reward, "Rollout complete");
    Ok(reward)
}
