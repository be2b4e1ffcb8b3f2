use super::types::{CellState, Position};
use crate::common::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Square board shared by every agent. The grid is the single source of
/// truth for obstacles and occupancy; agents only hold coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![CellState::Empty; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.size && position.col < self.size
    }

    /// Flat index of an in-bounds position, usable for arena-style scratch sets.
    pub fn index_of(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.row * self.size + position.col)
    }

    pub fn get(&self, position: Position) -> Option<CellState> {
        self.index_of(position).map(|idx| self.cells[idx])
    }

    /// Reads outside the grid report `Obstacle`.
    pub fn cell_state(&self, position: Position) -> CellState {
        self.get(position).unwrap_or(CellState::Obstacle)
    }

    /// Writes outside the grid are dropped.
    pub fn set_cell(&mut self, position: Position, state: CellState) {
        match self.index_of(position) {
            Some(idx) => self.cells[idx] = state,
            None => tracing::warn!("Dropped write of {:?} outside grid at {}", state, position),
        }
    }

    pub fn is_traversable(&self, position: Position) -> bool {
        self.cell_state(position).is_traversable()
    }

    pub fn check_bounds(&self, position: Position) -> DomainResult<()> {
        if self.contains(position) {
            Ok(())
        } else {
            Err(DomainError::OutOfBounds {
                position,
                size: self.size,
            })
        }
    }

    /// Applies a signed step to `position`, returning `None` when it leaves the grid.
    pub fn offset(&self, position: Position, dr: i64, dc: i64) -> Option<Position> {
        let row = position.row as i64 + dr;
        let col = position.col as i64 + dc;
        let n = self.size as i64;
        if (0..n).contains(&row) && (0..n).contains(&col) {
            Some(Position::new(row as usize, col as usize))
        } else {
            None
        }
    }

    /// In-bounds cells reached by each offset, in offset order.
    pub fn neighbourhood<'a>(
        &'a self,
        position: Position,
        offsets: &'a [(i64, i64)],
    ) -> impl Iterator<Item = Position> + 'a {
        offsets
            .iter()
            .filter_map(move |&(dr, dc)| self.offset(position, dr, dc))
    }

    pub fn empty_cells(&self) -> Vec<Position> {
        self.positions()
            .filter(|p| self.cell_state(*p) == CellState::Empty)
            .collect()
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == CellState::Obstacle)
            .count()
    }

    fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Position::new(row, col)))
    }

    /// Parses a square ASCII map: `.` empty, `#` obstacle, `*` frontier mark.
    /// Blank lines and surrounding whitespace are ignored.
    pub fn from_ascii(map: &str) -> DomainResult<Self> {
        let rows: Vec<&str> = map
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let size = rows.len();
        let mut grid = Grid::new(size);
        for (row, line) in rows.iter().enumerate() {
            let width = line.chars().count();
            if width != size {
                return Err(DomainError::InvalidMap {
                    reason: format!("row {} has {} cells, expected {}", row, width, size),
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let state = match ch {
                    '.' => CellState::Empty,
                    '#' => CellState::Obstacle,
                    '*' => CellState::FrontierMark,
                    other => {
                        return Err(DomainError::InvalidMap {
                            reason: format!("unknown cell '{}' at ({}, {})", other, row, col),
                        })
                    }
                };
                grid.set_cell(Position::new(row, col), state);
            }
        }
        Ok(grid)
    }

    /// Inverse of `from_ascii`; occupied cells render as `@`.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for row in 0..self.size {
            for col in 0..self.size {
                out.push(match self.cell_state(Position::new(row, col)) {
                    CellState::Empty => '.',
                    CellState::Obstacle => '#',
                    CellState::FrontierMark => '*',
                    CellState::Occupied(_) => '@',
                });
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ascii())
    }
}
