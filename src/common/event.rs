use crate::domains::grid::AgentId;

/// Something that happened to a single agent during a tick.
pub trait DomainEvent: Send + Sync + Clone {
    fn event_type(&self) -> &'static str;
    fn agent_id(&self) -> AgentId;
}
