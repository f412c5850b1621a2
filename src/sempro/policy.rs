// Status transition policy for the seminar proposal workflow
//
// The whole role-driven state machine is the `allowed_targets` table below.
// Everything else in this module reads from it.

use super::types::{Role, Status};

const NONE: &[Status] = &[];

/// Statuses `role` may move a record to from `current`.
///
/// Empty slice means the role has no permitted move from that status.
fn allowed_targets(current: Status, role: Role) -> &'static [Status] {
    use Role::*;
    use Status::*;

    match (current, role) {
        (Registered, Tendik | Koorpro) => &[Verified, Rejected],
        (Verified, Tendik | Koorpro) => &[Scheduled, Rejected],
        (Scheduled, Tendik | Koorpro) => &[Rejected],
        (Completed, Dosen) => &[RevisionRequired],
        (RevisionRequired, Mahasiswa) => &[Registered],
        (Rejected, Tendik | Koorpro) => &[Registered],
        _ => NONE,
    }
}

/// Whether `role` may move a record from `current` to `requested`.
///
/// Requesting the current status is always allowed, for every role.
pub fn is_valid_transition(current: Status, requested: Status, role: Role) -> bool {
    if current == requested {
        return true;
    }
    allowed_targets(current, role).contains(&requested)
}

/// Targets `role` may pick from `current`, in table order. Never includes
/// `current` itself.
pub fn possible_transitions(current: Status, role: Role) -> &'static [Status] {
    allowed_targets(current, role)
}

/// Fallback returned by [`transition_reason`] for pairs without dedicated text
pub const DEFAULT_REASON: &str = "status updated";

/// Audit text for a status change. Presentational only: a reason exists for
/// pairs the policy rejects, so it must never be read as a permission.
pub fn transition_reason(current: Status, requested: Status) -> &'static str {
    use Status::*;

    match (current, requested) {
        (Registered, Verified) => "document verified and complete",
        (Registered, Rejected) => "document rejected: does not meet requirements",
        (Verified, Scheduled) => "seminar has been scheduled",
        (Verified, Rejected) => "verification cancelled",
        (Scheduled, Completed) => "all evaluations completed",
        (Completed, RevisionRequired) => "revision required based on seminar outcome",
        (Completed, Approved) => "seminar approved by both supervisors",
        (RevisionRequired, Registered) => "revision uploaded and pending verification",
        (Rejected, Registered) => "resubmission after correction",
        _ => DEFAULT_REASON,
    }
}

/// Every non-empty `(status, role) -> targets` entry of the table
pub fn transition_table() -> impl Iterator<Item = (Status, Role, &'static [Status])> {
    Status::ALL.into_iter().flat_map(|status| {
        Role::ALL.into_iter().filter_map(move |role| {
            let targets = allowed_targets(status, role);
            (!targets.is_empty()).then_some((status, role, targets))
        })
    })
}
