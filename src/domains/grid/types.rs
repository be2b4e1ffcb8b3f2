use serde::{Deserialize, Serialize};
use std::fmt;

/// Row/column coordinate on a square grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Straight-line distance, ignoring obstacles.
    pub fn distance(&self, other: &Position) -> f64 {
        let dr = self.row as f64 - other.row as f64;
        let dc = self.col as f64 - other.col as f64;
        (dr * dr + dc * dc).sqrt()
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Empty,
    Obstacle,
    /// Left behind by a search that reached this cell.
    FrontierMark,
    Occupied(AgentId),
}

impl CellState {
    pub fn is_traversable(&self) -> bool {
        matches!(self, CellState::Empty | CellState::FrontierMark)
    }

    /// A bidirectional search treats these cells as the other side's footprint.
    pub fn signals_meeting(&self) -> bool {
        matches!(self, CellState::FrontierMark | CellState::Occupied(_))
    }
}

/// The stay option followed by the eight surrounding cells. Candidate order
/// feeds stable sorts, so this order is part of the search behaviour.
pub const NEIGHBOURHOOD: [(i64, i64); 9] = [
    (0, 0),
    (1, 0),
    (1, 1),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// `NEIGHBOURHOOD` without the stay option.
pub const SURROUNDING: [(i64, i64); 8] = [
    (1, 0),
    (1, 1),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];
