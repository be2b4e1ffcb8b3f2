use super::adaptive_radius::AdaptiveRadiusAgent;
use super::agent::SearchAgent;
use super::annealing::AnnealingAgent;
use super::best_first::BestFirstAgent;
use super::bidirectional::BidirectionalAgent;
use super::events::SearchEvent;
use super::greedy::GreedyLocalAgent;
use super::params::SearchParams;
use crate::domains::grid::{AgentId, Grid, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    BestFirst,
    Greedy,
    AdaptiveRadius,
    Annealing,
    Bidirectional,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::BestFirst,
        Strategy::Greedy,
        Strategy::AdaptiveRadius,
        Strategy::Annealing,
        Strategy::Bidirectional,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::BestFirst => "BestFirstAgent",
            Strategy::Greedy => "GreedyLocalAgent",
            Strategy::AdaptiveRadius => "AdaptiveRadiusAgent",
            Strategy::Annealing => "AnnealingAgent",
            Strategy::Bidirectional => "BidirectionalAgent",
        }
    }

    /// Builds a fresh agent. `seed` only matters for randomized strategies.
    pub fn spawn(&self, id: AgentId, start: Position, goal: Position, params: &SearchParams, seed: u64) -> Agent {
        match self {
            Strategy::BestFirst => Agent::BestFirst(BestFirstAgent::new(id, start, goal)),
            Strategy::Greedy => Agent::Greedy(GreedyLocalAgent::new(id, start, goal)),
            Strategy::AdaptiveRadius => Agent::AdaptiveRadius(AdaptiveRadiusAgent::new(
                id,
                start,
                goal,
                params.initial_radius,
                params.radius_cap,
            )),
            Strategy::Annealing => Agent::Annealing(AnnealingAgent::new(
                id,
                start,
                goal,
                params.initial_temperature,
                params.iteration_reset,
                seed,
            )),
            Strategy::Bidirectional => Agent::Bidirectional(BidirectionalAgent::new(id, start, goal)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed set of strategies the tick driver can hold.
#[derive(Debug, Clone)]
pub enum Agent {
    BestFirst(BestFirstAgent),
    Greedy(GreedyLocalAgent),
    AdaptiveRadius(AdaptiveRadiusAgent),
    Annealing(AnnealingAgent),
    Bidirectional(BidirectionalAgent),
}

impl Agent {
    fn inner(&self) -> &dyn SearchAgent {
        match self {
            Agent::BestFirst(a) => a,
            Agent::Greedy(a) => a,
            Agent::AdaptiveRadius(a) => a,
            Agent::Annealing(a) => a,
            Agent::Bidirectional(a) => a,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn SearchAgent {
        match self {
            Agent::BestFirst(a) => a,
            Agent::Greedy(a) => a,
            Agent::AdaptiveRadius(a) => a,
            Agent::Annealing(a) => a,
            Agent::Bidirectional(a) => a,
        }
    }
}

impl SearchAgent for Agent {
    fn id(&self) -> AgentId {
        self.inner().id()
    }

    fn strategy(&self) -> Strategy {
        self.inner().strategy()
    }

    fn position(&self) -> Position {
        self.inner().position()
    }

    fn goal(&self) -> Position {
        self.inner().goal()
    }

    fn is_goal(&self) -> bool {
        self.inner().is_goal()
    }

    fn heuristic(&self, at: Option<Position>) -> f64 {
        self.inner().heuristic(at)
    }

    fn heuristic_calls(&self) -> u64 {
        self.inner().heuristic_calls()
    }

    fn occupied_cells(&self) -> Vec<Position> {
        self.inner().occupied_cells()
    }

    fn step(&mut self, grid: &mut Grid) {
        self.inner_mut().step(grid)
    }

    fn uncommitted_events(&self) -> &[SearchEvent] {
        self.inner().uncommitted_events()
    }

    fn mark_events_as_committed(&mut self) {
        self.inner_mut().mark_events_as_committed()
    }
}
