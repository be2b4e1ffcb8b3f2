use super::agent::SearchAgent;
use super::base::{sort_by_score, AgentCore};
use super::events::SearchEvent;
use super::strategy::Strategy;
use crate::domains::grid::{AgentId, Grid, Position, NEIGHBOURHOOD};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Simulated annealing over the immediate neighbourhood.
///
/// There is no searched set: revisiting cells is allowed, which is what lets
/// the agent walk out of local optima while the temperature is high.
#[derive(Debug, Clone)]
pub struct AnnealingAgent {
    core: AgentCore,
    frontier: Vec<Position>,
    iterations: u32,
    temperature: f64,
    iteration_reset: u32,
    rng: StdRng,
}

/// Chance of taking a move that is `delta` worse (`delta <= 0`) at temperature `t`.
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    (delta / temperature).exp()
}

/// Bucket list for the candidate draw over frontier indices `1..n`: index `k`
/// appears `n - k` times, so cells close to the head of the sorted frontier
/// are drawn more often. Empty when `n < 2`.
pub fn weighted_indices(n: usize) -> Vec<usize> {
    let mut buckets = Vec::with_capacity(n.saturating_sub(1) * n / 2);
    for i in (1..n).rev() {
        buckets.extend(std::iter::repeat(n - i).take(i));
    }
    buckets
}

impl AnnealingAgent {
    pub fn new(
        id: AgentId,
        start: Position,
        goal: Position,
        temperature: f64,
        iteration_reset: u32,
        seed: u64,
    ) -> Self {
        Self {
            core: AgentCore::new(id, start, goal),
            frontier: Vec::new(),
            iterations: 1,
            temperature,
            iteration_reset,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Temperature after the schedule has been applied for the current iteration.
    pub fn current_temperature(&self) -> f64 {
        self.temperature / self.iterations as f64
    }

    pub fn frontier(&self) -> &[Position] {
        &self.frontier
    }

    fn open_moves(&self, grid: &Grid) -> Vec<Position> {
        grid.neighbourhood(self.core.position, &NEIGHBOURHOOD)
            .filter(|p| grid.is_traversable(*p))
            .collect()
    }
}

impl SearchAgent for AnnealingAgent {
    fn id(&self) -> AgentId {
        self.core.id
    }

    fn strategy(&self) -> Strategy {
        Strategy::Annealing
    }

    fn position(&self) -> Position {
        self.core.position
    }

    fn goal(&self) -> Position {
        self.core.goal
    }

    fn is_goal(&self) -> bool {
        self.core.is_goal()
    }

    fn heuristic(&self, at: Option<Position>) -> f64 {
        self.core.heuristic(at)
    }

    fn heuristic_calls(&self) -> u64 {
        self.core.heuristic_calls()
    }

    fn step(&mut self, grid: &mut Grid) {
        if self.core.is_goal() {
            return;
        }

        let mut moves = self.open_moves(grid);
        let core = &self.core;
        sort_by_score(&mut moves, |p| core.heuristic(Some(p)));
        self.frontier = moves;

        if self.frontier.is_empty() {
            self.core.note_stall();
            return;
        }

        if self.iterations > self.iteration_reset {
            self.iterations = 1;
            self.core.record(SearchEvent::IterationsReset {
                agent_id: self.core.id,
            });
        }

        let t = self.current_temperature();
        let n = self.frontier.len();

        let mut pop_index = 0;
        let mut target = self.frontier[0];

        let buckets = weighted_indices(n);
        if let Some(&candidate_index) = buckets.choose(&mut self.rng) {
            let candidate = self.frontier[candidate_index];
            let delta = self.core.heuristic(Some(target)) - self.core.heuristic(Some(candidate));

            if delta > 0.0 {
                pop_index = candidate_index;
                target = candidate;
            } else if self.rng.gen::<f64>() < acceptance_probability(delta, t) {
                // The worse cell is taken but pop_index stays at the head, so
                // `frontier()` loses the head rather than the cell moved to.
                target = candidate;
                self.core.record(SearchEvent::WorseMoveAccepted {
                    agent_id: self.core.id,
                    delta,
                    temperature: t,
                });
            }
        }

        self.iterations += 1;
        self.core.relocate(grid, target);
        // Rebuilt next tick; until then `frontier()` shows what was left after the pop.
        self.frontier.remove(pop_index);
        self.core.note_arrival();
    }

    fn uncommitted_events(&self) -> &[SearchEvent] {
        self.core.uncommitted_events()
    }

    fn mark_events_as_committed(&mut self) {
        self.core.mark_events_as_committed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_indices_favour_the_head() {
        assert_eq!(weighted_indices(4), vec![1, 1, 1, 2, 2, 3]);
        assert!(weighted_indices(1).is_empty());
        assert!(weighted_indices(0).is_empty());
    }
}
