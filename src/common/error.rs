use crate::domains::grid::{AgentId, Position};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Position {position} is outside a {size}x{size} grid")]
    OutOfBounds { position: Position, size: usize },

    #[error("Cell {position} is blocked")]
    CellBlocked { position: Position },

    #[error("Agent not found: {id}")]
    AgentNotFound { id: AgentId },

    #[error("Invalid command: {reason}")]
    InvalidCommand { reason: String },

    #[error("Invalid map: {reason}")]
    InvalidMap { reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
