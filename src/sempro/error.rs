use thiserror::Error;

use super::types::{Role, Status, SystemEvent};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("access restricted: {role} may not move a submission from {from} to {to}")]
    Denied { from: Status, to: Status, role: Role },
    #[error("access restricted: {role} is not a participant of submission {record_id}")]
    NotParticipant { record_id: u64, role: Role },
    #[error("access restricted: no recognised role")]
    NoRole,
    #[error("event {event} does not apply to a submission in {status}")]
    NotEligible { status: Status, event: SystemEvent },
    #[error("submission {0} not found")]
    NotFound(u64),
    #[error("submission {id} changed concurrently: expected version {expected}, found {actual}")]
    Conflict { id: u64, expected: u64, actual: u64 },
    #[error("record store error: {0}")]
    Store(String),
}

impl WorkflowError {
    /// Denials are normal outcomes the caller turns into an "access restricted"
    /// message; everything else is an operational failure.
    pub fn is_denial(&self) -> bool {
        matches!(
            self,
            WorkflowError::Denied { .. } | WorkflowError::NotParticipant { .. } | WorkflowError::NoRole
        )
    }
}
