// SITASI ITK Library - Seminar proposal workflow core
// Exposes the transition policy and workflow service for the web handlers and tests

pub mod cli;
pub mod config;
pub mod sempro;
pub mod telemetry;

// Re-export key types for easy access
pub use config::{config, SitasiConfig};
pub use sempro::{
    is_valid_transition, possible_transitions, resolve_effective_role, system_transition,
    transition_reason, InMemoryRecordStore, RecordStore, Role, RolePrecedence, SemproRecord,
    SemproWorkflow, Status, SystemEvent, TransitionOutcome, WorkflowError, WorkflowOptions,
};
pub use telemetry::{create_transition_span, generate_correlation_id, init_telemetry};
