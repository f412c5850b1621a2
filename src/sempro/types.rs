// Core types for the seminar proposal workflow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Workflow status of a seminar proposal submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Submitted by the student, waiting for document verification
    Registered,
    /// Documents checked by administrative staff
    Verified,
    /// Seminar date, room and examiners assigned
    Scheduled,
    /// Every required evaluation has been recorded
    Completed,
    /// Supervisor asked for a revision after the seminar
    RevisionRequired,
    /// Submission refused, may be resubmitted
    Rejected,
    /// Approved by the supervisors; terminal
    Approved,
}

impl Status {
    pub const ALL: [Status; 7] = [
        Status::Registered,
        Status::Verified,
        Status::Scheduled,
        Status::Completed,
        Status::RevisionRequired,
        Status::Rejected,
        Status::Approved,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Registered => "registered",
            Status::Verified => "verified",
            Status::Scheduled => "scheduled",
            Status::Completed => "completed",
            Status::RevisionRequired => "revision_required",
            Status::Rejected => "rejected",
            Status::Approved => "approved",
        }
    }

    /// No role and no system event can move a record out of this status
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Approved)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status '{0}'")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

/// Capability class of the acting user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Student who owns the submission
    Mahasiswa,
    /// Lecturer acting as supervisor (pembimbing) or examiner (penguji)
    Dosen,
    /// Administrative staff
    Tendik,
    /// Study program coordinator
    Koorpro,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Mahasiswa, Role::Dosen, Role::Tendik, Role::Koorpro];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Mahasiswa => "mahasiswa",
            Role::Dosen => "dosen",
            Role::Tendik => "tendik",
            Role::Koorpro => "koorpro",
        }
    }

    /// Staff roles act on any record, not only the ones they participate in
    pub fn is_administrative(self) -> bool {
        matches!(self, Role::Tendik | Role::Koorpro)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}'")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| ParseRoleError(s.to_string()))
    }
}

/// External events that make a record eligible for a system-initiated move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemEvent {
    /// Every required seminar evaluation exists
    AllEvaluationsRecorded,
    /// Every required approval has been collected
    AllApprovalsCollected,
}

impl fmt::Display for SystemEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SystemEvent::AllEvaluationsRecorded => "all_evaluations_recorded",
            SystemEvent::AllApprovalsCollected => "all_approvals_collected",
        };
        f.pad(label)
    }
}

/// Who initiated a status change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "by", rename_all = "snake_case")]
pub enum TransitionKind {
    Role(Role),
    System(SystemEvent),
}

/// Audit trail entry stored alongside a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: Status,
    pub to: Status,
    pub actor_id: Option<String>,
    pub kind: TransitionKind,
    pub reason: String,
    pub at: DateTime<Utc>,
}

/// A seminar proposal submission as the workflow sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemproRecord {
    pub id: u64,
    pub student_id: String,
    pub title: String,
    pub supervisor_ids: Vec<String>,
    pub examiner_ids: Vec<String>,
    pub status: Status,
    /// Bumped on every persisted status change; used for compare-and-set
    pub version: u64,
    pub updated_at: DateTime<Utc>,
    pub history: Vec<TransitionRecord>,
}

impl SemproRecord {
    /// New submission in `registered`. The id is assigned by the store.
    pub fn new(
        student_id: impl Into<String>,
        title: impl Into<String>,
        supervisor_ids: Vec<String>,
        examiner_ids: Vec<String>,
    ) -> Self {
        Self {
            id: 0,
            student_id: student_id.into(),
            title: title.into(),
            supervisor_ids,
            examiner_ids,
            status: Status::Registered,
            version: 0,
            updated_at: Utc::now(),
            history: Vec::new(),
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.student_id == user_id
    }

    /// Supervisor or examiner on this submission
    pub fn is_lecturer(&self, user_id: &str) -> bool {
        self.supervisor_ids.iter().any(|id| id == user_id)
            || self.examiner_ids.iter().any(|id| id == user_id)
    }
}
