use super::agent::SearchAgent;
use super::base::{AgentCore, Frontier};
use super::events::SearchEvent;
use super::strategy::Strategy;
use crate::domains::grid::{AgentId, Grid, Position, NEIGHBOURHOOD};
use std::collections::HashSet;

/// Global best-first search. The frontier only grows and the searched set is
/// never cleared, so the agent can always resume from its best open cell.
#[derive(Debug, Clone)]
pub struct BestFirstAgent {
    core: AgentCore,
    frontier: Frontier,
    searched: HashSet<Position>,
}

impl BestFirstAgent {
    pub fn new(id: AgentId, start: Position, goal: Position) -> Self {
        Self {
            core: AgentCore::new(id, start, goal),
            frontier: Frontier::new(),
            searched: HashSet::new(),
        }
    }

    pub fn frontier(&self) -> &[Position] {
        self.frontier.as_slice()
    }

    pub fn searched(&self) -> &HashSet<Position> {
        &self.searched
    }

    fn open_moves(&self, grid: &Grid) -> Vec<Position> {
        grid.neighbourhood(self.core.position, &NEIGHBOURHOOD)
            .filter(|p| !self.searched.contains(p) && !self.frontier.contains(p))
            .filter(|p| grid.is_traversable(*p))
            .collect()
    }
}

impl SearchAgent for BestFirstAgent {
    fn id(&self) -> AgentId {
        self.core.id
    }

    fn strategy(&self) -> Strategy {
        Strategy::BestFirst
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

        let moves = self.open_moves(grid);
        self.frontier.extend(moves);
        let core = &self.core;
        self.frontier.sort_by_score(|p| core.heuristic(Some(p)));

        let Some(next) = self.frontier.pop_best() else {
            self.core.note_stall();
            return;
        };

        self.core.relocate(grid, next);
        self.searched.insert(next);
        self.core.note_arrival();
    }

    fn uncommitted_events(&self) -> &[SearchEvent] {
        self.core.uncommitted_events()
    }

    fn mark_events_as_committed(&mut self) {
        self.core.mark_events_as_committed();
    }
}
