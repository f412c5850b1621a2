// System-initiated transitions
//
// These moves are triggered by external facts (evaluations recorded,
// approvals collected) rather than by a role, so they stay out of the role
// table. This module only says which move an event makes eligible; deciding
// when the event has happened belongs to the caller.

use super::types::{Status, SystemEvent};

/// Target status `event` makes `current` eligible for, if any
pub fn system_transition(current: Status, event: SystemEvent) -> Option<Status> {
    match (current, event) {
        (Status::Scheduled, SystemEvent::AllEvaluationsRecorded) => Some(Status::Completed),
        (Status::Completed, SystemEvent::AllApprovalsCollected) => Some(Status::Approved),
        _ => None,
    }
}
