// Arena - sequential tick driver over one shared grid
use crate::common::{DomainError, DomainEvent, DomainResult};
use crate::domains::grid::{AgentId, CellState, Grid, Position};
use crate::domains::logger::DynLogger;
use crate::domains::search::{Agent, AgentProjection, SearchAgent, SearchEvent, SearchParams, Strategy};
use std::collections::HashSet;

/// Owns the grid and every agent on it. Agents step strictly one after
/// another, so a later agent in a tick sees whatever earlier agents did to
/// the grid in that same tick.
pub struct Arena {
    grid: Grid,
    agents: Vec<Agent>,
    projections: Vec<AgentProjection>,
    ticks: u64,
    logger: DynLogger,
}

impl Arena {
    pub fn new(grid: Grid, logger: DynLogger) -> Self {
        Self {
            grid,
            agents: Vec::new(),
            projections: Vec::new(),
            ticks: 0,
            logger,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn next_id(&self) -> AgentId {
        AgentId(self.agents.len() as u32)
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id() == id)
    }

    pub fn projection(&self, id: AgentId) -> Option<&AgentProjection> {
        self.projections.iter().find(|p| p.agent_id == id)
    }

    /// Builds an agent with the next free id and places it.
    pub fn spawn(
        &mut self,
        strategy: Strategy,
        start: Position,
        goal: Position,
        params: &SearchParams,
        seed: u64,
    ) -> DomainResult<AgentId> {
        let agent = strategy.spawn(self.next_id(), start, goal, params, seed);
        self.insert(agent)
    }

    /// Validates placement and marks every cell the agent occupies.
    pub fn insert(&mut self, agent: Agent) -> DomainResult<AgentId> {
        let id = agent.id();
        if self.agent(id).is_some() {
            return Err(DomainError::InvalidCommand {
                reason: format!("Agent {} is already in the arena", id),
            });
        }

        self.grid.check_bounds(agent.goal())?;
        let mut seen = HashSet::new();
        let cells: Vec<Position> = agent
            .occupied_cells()
            .into_iter()
            .filter(|cell| seen.insert(*cell))
            .collect();
        for cell in &cells {
            self.grid.check_bounds(*cell)?;
            if self.grid.cell_state(*cell) != CellState::Empty {
                return Err(DomainError::CellBlocked { position: *cell });
            }
        }
        for cell in cells {
            self.grid.set_cell(cell, CellState::Occupied(id));
        }

        tracing::debug!(
            agent = %id,
            strategy = agent.name(),
            start = %agent.position(),
            goal = %agent.goal(),
            "placed agent"
        );
        self.projections.push(AgentProjection::new(id, agent.strategy()));
        self.agents.push(agent);
        Ok(id)
    }

    /// Steps the listed agents once each, in the given order.
    pub fn tick(&mut self, order: &[AgentId]) -> DomainResult<()> {
        let indices = order
            .iter()
            .map(|id| {
                self.agents
                    .iter()
                    .position(|a| a.id() == *id)
                    .ok_or(DomainError::AgentNotFound { id: *id })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        for idx in indices {
            self.step_agent(idx);
        }
        self.ticks += 1;
        Ok(())
    }

    /// Steps every agent in insertion order.
    pub fn tick_all(&mut self) {
        for idx in 0..self.agents.len() {
            self.step_agent(idx);
        }
        self.ticks += 1;
    }

    pub fn all_at_goal(&self) -> bool {
        self.agents.iter().all(|a| a.is_goal())
    }

    /// Ticks until every agent is at its goal or `step_cap` ticks have run.
    /// Returns the number of ticks executed by this call.
    pub fn run_until_settled(&mut self, step_cap: u64) -> u64 {
        let mut executed = 0;
        while executed < step_cap && !self.all_at_goal() {
            self.tick_all();
            executed += 1;
        }
        tracing::debug!(ticks = executed, settled = self.all_at_goal(), "arena run finished");
        executed
    }

    fn step_agent(&mut self, idx: usize) {
        let agent = &mut self.agents[idx];
        agent.step(&mut self.grid);

        for event in agent.uncommitted_events() {
            tracing::trace!(agent = %event.agent_id(), tick = self.ticks, "{}", event.event_type());
            match event {
                SearchEvent::GoalReached { agent_id, at } => {
                    tracing::debug!(agent = %agent_id, at = %at, tick = self.ticks, "goal reached");
                }
                SearchEvent::RadiusCapReached { agent_id, radius } => {
                    self.logger.warn(&format!("{} hit the radius cap ({})", agent_id, radius));
                }
                _ => {}
            }
            if let Some(projection) = self.projections.get_mut(idx) {
                projection.apply(event);
            }
        }
        agent.mark_events_as_committed();
    }
}
