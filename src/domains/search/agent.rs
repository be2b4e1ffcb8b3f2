use super::events::SearchEvent;
use super::strategy::Strategy;
use crate::domains::grid::{AgentId, Grid, Position};

/// Contract every search strategy exposes to the tick driver.
pub trait SearchAgent {
    fn id(&self) -> AgentId;
    fn strategy(&self) -> Strategy;

    fn name(&self) -> &'static str {
        self.strategy().name()
    }

    fn position(&self) -> Position;
    fn goal(&self) -> Position;
    fn is_goal(&self) -> bool;

    /// Straight-line distance from `at` (default: the current position) to the goal.
    fn heuristic(&self, at: Option<Position>) -> f64;

    /// Number of heuristic evaluations performed so far, sort keys included.
    fn heuristic_calls(&self) -> u64;

    /// Cells this agent marks as occupied on the grid.
    fn occupied_cells(&self) -> Vec<Position> {
        vec![self.position()]
    }

    /// One tick: inspect the grid, possibly relocate. Never fails; a stuck
    /// agent simply stops changing position.
    fn step(&mut self, grid: &mut Grid);

    fn uncommitted_events(&self) -> &[SearchEvent];
    fn mark_events_as_committed(&mut self);
}
