use thiserror::Error;

use fr_core::{AgentId, AgentKind, CoreError};

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("no {kind} with id {id}")]
    AgentNotFound { kind: AgentKind, id: AgentId },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type FleetResult<T> = Result<T, FleetError>;
