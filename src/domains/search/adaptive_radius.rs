use super::agent::SearchAgent;
use super::base::{sort_by_score, AgentCore};
use super::events::SearchEvent;
use super::strategy::Strategy;
use crate::domains::grid::{AgentId, Grid, Position, NEIGHBOURHOOD};
use std::collections::{HashSet, VecDeque};

/// Local search that widens its neighbourhood whenever it hits a plateau.
///
/// Candidates are every traversable cell within `radius` 8-connected hops
/// that improves on the current heuristic, best first. An empty
/// neighbourhood bumps the radius once per tick and rescans; the radius never
/// shrinks, and reaching `radius_cap` freezes the agent permanently.
#[derive(Debug, Clone)]
pub struct AdaptiveRadiusAgent {
    core: AgentCore,
    frontier: Vec<Position>,
    searched: HashSet<Position>,
    radius: u32,
    radius_cap: u32,
    current_search: Vec<bool>,
}

impl AdaptiveRadiusAgent {
    pub fn new(id: AgentId, start: Position, goal: Position, radius: u32, radius_cap: u32) -> Self {
        Self {
            core: AgentCore::new(id, start, goal),
            frontier: Vec::new(),
            searched: HashSet::new(),
            radius,
            radius_cap,
            current_search: Vec::new(),
        }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn radius_cap(&self) -> u32 {
        self.radius_cap
    }

    pub fn searched(&self) -> &HashSet<Position> {
        &self.searched
    }

    pub fn is_capped(&self) -> bool {
        self.radius >= self.radius_cap
    }

    /// Breadth-first sweep out to `radius` hops. `current_search` is a flat
    /// scratch set indexed by grid cell and only lives for one sweep.
    fn open_moves(&mut self, grid: &Grid) -> Vec<Position> {
        self.current_search.clear();
        self.current_search.resize(grid.size() * grid.size(), false);

        let mut reached = Vec::new();
        let mut queue = VecDeque::from([(self.core.position, 0u32)]);
        while let Some((at, depth)) = queue.pop_front() {
            if depth >= self.radius {
                continue;
            }
            for next in grid.neighbourhood(at, &NEIGHBOURHOOD) {
                let Some(idx) = grid.index_of(next) else {
                    continue;
                };
                if self.current_search[idx] || !grid.is_traversable(next) {
                    continue;
                }
                self.current_search[idx] = true;
                reached.push(next);
                queue.push_back((next, depth + 1));
            }
        }

        let current = self.core.heuristic(None);
        reached
            .into_iter()
            .filter(|p| self.core.heuristic(Some(*p)) < current)
            .collect()
    }

    fn refresh_frontier(&mut self, grid: &Grid) {
        let mut moves = self.open_moves(grid);
        let core = &self.core;
        sort_by_score(&mut moves, |p| core.heuristic(Some(p)));
        self.frontier = moves;
    }

    /// Widens the radius by one and rescans. The rescan is left in discovery
    /// order, so the first improving cell found is the one taken.
    fn widen_and_rescan(&mut self, grid: &Grid) {
        self.radius += 1;
        self.core.record(SearchEvent::RadiusWidened {
            agent_id: self.core.id,
            radius: self.radius,
        });
        if self.is_capped() {
            self.core.record(SearchEvent::RadiusCapReached {
                agent_id: self.core.id,
                radius: self.radius,
            });
        }
        self.frontier = self.open_moves(grid);
    }
}

impl SearchAgent for AdaptiveRadiusAgent {
    fn id(&self) -> AgentId {
        self.core.id
    }

    fn strategy(&self) -> Strategy {
        Strategy::AdaptiveRadius
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
        if self.core.is_goal() || self.is_capped() {
            return;
        }

        self.refresh_frontier(grid);
        if self.frontier.is_empty() {
            self.widen_and_rescan(grid);
            if self.frontier.is_empty() {
                self.core.note_stall();
                return;
            }
        }

        let next = self.frontier.remove(0);
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
