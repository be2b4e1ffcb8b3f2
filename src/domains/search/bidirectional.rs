use super::agent::SearchAgent;
use super::base::{AgentCore, Frontier};
use super::events::SearchEvent;
use super::strategy::Strategy;
use crate::domains::grid::{AgentId, CellState, Grid, Position, SURROUNDING};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Forward,
    Reverse,
}

/// Two best-first searches chasing each other: the forward anchor heads for
/// the goal anchor while the goal anchor heads back for the forward one.
/// Both anchors walk the grid as occupied cells, and the run is over once
/// they share a cell.
#[derive(Debug, Clone)]
pub struct BidirectionalAgent {
    core: AgentCore,
    frontier: Frontier,
    searched: HashSet<Position>,
    goal_frontier: Frontier,
    goal_searched: HashSet<Position>,
}

impl BidirectionalAgent {
    pub fn new(id: AgentId, start: Position, goal: Position) -> Self {
        Self {
            core: AgentCore::new(id, start, goal),
            frontier: Frontier::new(),
            searched: HashSet::new(),
            goal_frontier: Frontier::new(),
            goal_searched: HashSet::new(),
        }
    }

    pub fn frontier(&self) -> &[Position] {
        self.frontier.as_slice()
    }

    pub fn goal_frontier(&self) -> &[Position] {
        self.goal_frontier.as_slice()
    }

    /// Distance from a goal-side candidate to the forward anchor.
    pub fn reverse_heuristic(&self, at: Option<Position>) -> f64 {
        self.core.distance(at.unwrap_or(self.core.goal), self.core.position)
    }

    /// Neighbours of one anchor. Touching a frontier mark or any occupied
    /// cell collapses both frontiers onto that cell and yields nothing, so
    /// the next pop on each side lands there.
    fn open_moves(&mut self, grid: &Grid, side: Side) -> Vec<Position> {
        let anchor = match side {
            Side::Forward => self.core.position,
            Side::Reverse => self.core.goal,
        };

        let mut out = Vec::new();
        for next in grid.neighbourhood(anchor, &SURROUNDING) {
            let state = grid.cell_state(next);
            if state.signals_meeting() {
                self.frontier.collapse_to(next);
                self.goal_frontier.collapse_to(next);
                self.core.record(SearchEvent::MeetingDetected {
                    agent_id: self.core.id,
                    at: next,
                });
                return Vec::new();
            }

            let (frontier, searched) = match side {
                Side::Forward => (&self.frontier, &self.searched),
                Side::Reverse => (&self.goal_frontier, &self.goal_searched),
            };
            if state.is_traversable() && !searched.contains(&next) && !frontier.contains(&next) {
                out.push(next);
            }
        }
        out
    }
}

impl SearchAgent for BidirectionalAgent {
    fn id(&self) -> AgentId {
        self.core.id
    }

    fn strategy(&self) -> Strategy {
        Strategy::Bidirectional
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

    fn occupied_cells(&self) -> Vec<Position> {
        vec![self.core.position, self.core.goal]
    }

    fn step(&mut self, grid: &mut Grid) {
        if self.core.is_goal() {
            return;
        }

        let moves = self.open_moves(grid, Side::Forward);
        self.frontier.extend(moves);
        let core = &self.core;
        self.frontier.sort_by_score(|p| core.heuristic(Some(p)));

        let moves = self.open_moves(grid, Side::Reverse);
        self.goal_frontier.extend(moves);
        let core = &self.core;
        let anchor = core.position;
        self.goal_frontier.sort_by_score(|p| core.distance(p, anchor));

        if self.frontier.is_empty() || self.goal_frontier.is_empty() {
            self.core.note_stall();
            return;
        }
        let (Some(next), Some(goal_next)) = (self.frontier.pop_best(), self.goal_frontier.pop_best()) else {
            return;
        };

        self.core.relocate(grid, next);

        grid.set_cell(self.core.goal, CellState::Empty);
        self.core.goal = goal_next;
        grid.set_cell(goal_next, CellState::Occupied(self.core.id));

        self.searched.insert(next);
        self.goal_searched.insert(goal_next);
        self.core.note_arrival();
    }

    fn uncommitted_events(&self) -> &[SearchEvent] {
        self.core.uncommitted_events()
    }

    fn mark_events_as_committed(&mut self) {
        self.core.mark_events_as_committed();
    }
}
