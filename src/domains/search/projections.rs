use super::events::SearchEvent;
use super::strategy::Strategy;
use crate::domains::grid::AgentId;
use serde::{Deserialize, Serialize};

/// Running tally of one agent's events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProjection {
    pub agent_id: AgentId,
    pub strategy: Strategy,
    pub moves: u64,
    pub stalled_ticks: u64,
    pub radius_widenings: u64,
    pub radius_capped: bool,
    pub iteration_resets: u64,
    pub worse_moves_accepted: u64,
    pub meetings: u64,
    pub reached_goal: bool,
}

impl AgentProjection {
    pub fn new(agent_id: AgentId, strategy: Strategy) -> Self {
        Self {
            agent_id,
            strategy,
            moves: 0,
            stalled_ticks: 0,
            radius_widenings: 0,
            radius_capped: false,
            iteration_resets: 0,
            worse_moves_accepted: 0,
            meetings: 0,
            reached_goal: false,
        }
    }

    pub fn apply(&mut self, event: &SearchEvent) {
        match event {
            SearchEvent::Moved { .. } => self.moves += 1,
            SearchEvent::Stalled { .. } => self.stalled_ticks += 1,
            SearchEvent::RadiusWidened { .. } => self.radius_widenings += 1,
            SearchEvent::RadiusCapReached { .. } => self.radius_capped = true,
            SearchEvent::IterationsReset { .. } => self.iteration_resets += 1,
            SearchEvent::WorseMoveAccepted { .. } => self.worse_moves_accepted += 1,
            SearchEvent::MeetingDetected { .. } => self.meetings += 1,
            SearchEvent::GoalReached { .. } => self.reached_goal = true,
        }
    }
}
