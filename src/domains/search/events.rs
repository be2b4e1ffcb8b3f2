use crate::common::DomainEvent;
use crate::domains::grid::{AgentId, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchEvent {
    Moved {
        agent_id: AgentId,
        from: Position,
        to: Position,
    },
    /// A tick that ended without a move while the goal was still unreached.
    Stalled {
        agent_id: AgentId,
        at: Position,
    },
    RadiusWidened {
        agent_id: AgentId,
        radius: u32,
    },
    RadiusCapReached {
        agent_id: AgentId,
        radius: u32,
    },
    IterationsReset {
        agent_id: AgentId,
    },
    WorseMoveAccepted {
        agent_id: AgentId,
        delta: f64,
        temperature: f64,
    },
    MeetingDetected {
        agent_id: AgentId,
        at: Position,
    },
    GoalReached {
        agent_id: AgentId,
        at: Position,
    },
}

impl DomainEvent for SearchEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SearchEvent::Moved { .. } => "Moved",
            SearchEvent::Stalled { .. } => "Stalled",
            SearchEvent::RadiusWidened { .. } => "RadiusWidened",
            SearchEvent::RadiusCapReached { .. } => "RadiusCapReached",
            SearchEvent::IterationsReset { .. } => "IterationsReset",
            SearchEvent::WorseMoveAccepted { .. } => "WorseMoveAccepted",
            SearchEvent::MeetingDetected { .. } => "MeetingDetected",
            SearchEvent::GoalReached { .. } => "GoalReached",
        }
    }

    fn agent_id(&self) -> AgentId {
        match self {
            SearchEvent::Moved { agent_id, .. }
            | SearchEvent::Stalled { agent_id, .. }
            | SearchEvent::RadiusWidened { agent_id, .. }
            | SearchEvent::RadiusCapReached { agent_id, .. }
            | SearchEvent::IterationsReset { agent_id }
            | SearchEvent::WorseMoveAccepted { agent_id, .. }
            | SearchEvent::MeetingDetected { agent_id, .. }
            | SearchEvent::GoalReached { agent_id, .. } => *agent_id,
        }
    }
}
