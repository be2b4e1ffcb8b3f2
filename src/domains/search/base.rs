use super::events::SearchEvent;
use crate::domains::grid::{AgentId, CellState, Grid, Position};
use ordered_float::OrderedFloat;
use std::cell::Cell;
use std::collections::HashSet;

/// State shared by every strategy: identity, anchors, heuristic accounting
/// and the pending event list.
#[derive(Debug, Clone)]
pub struct AgentCore {
    pub id: AgentId,
    pub position: Position,
    pub goal: Position,
    heuristic_calls: Cell<u64>,
    events: Vec<SearchEvent>,
}

impl AgentCore {
    pub fn new(id: AgentId, start: Position, goal: Position) -> Self {
        Self {
            id,
            position: start,
            goal,
            heuristic_calls: Cell::new(0),
            events: Vec::new(),
        }
    }

    pub fn is_goal(&self) -> bool {
        self.position == self.goal
    }

    pub fn heuristic(&self, at: Option<Position>) -> f64 {
        self.distance(at.unwrap_or(self.position), self.goal)
    }

    /// Counted distance between two arbitrary cells.
    pub fn distance(&self, from: Position, to: Position) -> f64 {
        self.heuristic_calls.set(self.heuristic_calls.get() + 1);
        from.distance(&to)
    }

    pub fn heuristic_calls(&self) -> u64 {
        self.heuristic_calls.get()
    }

    /// Vacates the current cell and claims `to`. The target is not re-checked:
    /// a plan made earlier in the tick is carried out as is.
    pub fn relocate(&mut self, grid: &mut Grid, to: Position) {
        let from = self.position;
        grid.set_cell(from, CellState::Empty);
        self.position = to;
        grid.set_cell(to, CellState::Occupied(self.id));
        self.record(SearchEvent::Moved {
            agent_id: self.id,
            from,
            to,
        });
    }

    pub fn note_arrival(&mut self) {
        if self.is_goal() {
            self.record(SearchEvent::GoalReached {
                agent_id: self.id,
                at: self.position,
            });
        }
    }

    pub fn note_stall(&mut self) {
        self.record(SearchEvent::Stalled {
            agent_id: self.id,
            at: self.position,
        });
    }

    pub fn record(&mut self, event: SearchEvent) {
        self.events.push(event);
    }

    pub fn uncommitted_events(&self) -> &[SearchEvent] {
        &self.events
    }

    pub fn mark_events_as_committed(&mut self) {
        self.events.clear();
    }
}

/// Stable ascending sort on `key + 1`. The constant offset never changes the
/// order; it is kept so sort keys match the reported scores.
pub fn sort_by_score<F>(cells: &mut [Position], mut key: F)
where
    F: FnMut(Position) -> f64,
{
    cells.sort_by_cached_key(|p| OrderedFloat(key(*p) + 1.0));
}

/// Ordered candidate list with constant-time membership checks.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    queue: Vec<Position>,
    members: HashSet<Position>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn contains(&self, position: &Position) -> bool {
        self.members.contains(position)
    }

    pub fn as_slice(&self) -> &[Position] {
        &self.queue
    }

    /// Appends in order, skipping cells already queued.
    pub fn extend<I: IntoIterator<Item = Position>>(&mut self, cells: I) {
        for cell in cells {
            if self.members.insert(cell) {
                self.queue.push(cell);
            }
        }
    }

    pub fn sort_by_score<F: FnMut(Position) -> f64>(&mut self, key: F) {
        sort_by_score(&mut self.queue, key);
    }

    pub fn pop_best(&mut self) -> Option<Position> {
        if self.queue.is_empty() {
            return None;
        }
        let best = self.queue.remove(0);
        self.members.remove(&best);
        Some(best)
    }

    /// Drops every candidate except `position`.
    pub fn collapse_to(&mut self, position: Position) {
        self.queue.clear();
        self.members.clear();
        self.extend([position]);
    }

    pub fn replace<I: IntoIterator<Item = Position>>(&mut self, cells: I) {
        self.queue.clear();
        self.members.clear();
        self.extend(cells);
    }
}
