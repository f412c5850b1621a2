// Seminar proposal (sempro) workflow
//
// `policy` is the pure role-based decision table. `roles` and `system` sit
// beside it, and `workflow` composes all three with a `RecordStore`.

pub mod error;
pub mod policy;
pub mod roles;
pub mod store;
pub mod system;
pub mod types;
pub mod workflow;

pub use error::WorkflowError;
pub use policy::{is_valid_transition, possible_transitions, transition_reason, transition_table, DEFAULT_REASON};
pub use roles::{resolve_effective_role, RolePrecedence, DEFAULT_PRECEDENCE};
pub use store::{InMemoryRecordStore, RecordStore};
pub use system::system_transition;
pub use types::{
    ParseRoleError, ParseStatusError, Role, SemproRecord, Status, SystemEvent, TransitionKind,
    TransitionRecord,
};
pub use workflow::{SemproWorkflow, TransitionOutcome, WorkflowOptions};
