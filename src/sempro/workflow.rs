// Workflow service: load, resolve role, check policy, persist
//
// The policy itself never touches the store. This service is the caller-side
// composition around it, and relies on the store's version check to settle
// concurrent attempts on the same record.

use chrono::Utc;

use super::error::WorkflowError;
use super::policy::{is_valid_transition, possible_transitions, transition_reason};
use super::roles::RolePrecedence;
use super::store::RecordStore;
use super::system::system_transition;
use super::types::{Role, SemproRecord, Status, SystemEvent, TransitionKind, TransitionRecord};
use crate::telemetry::create_transition_span;

/// Options controlling how callers are authorised
#[derive(Debug, Clone)]
pub struct WorkflowOptions {
    pub precedence: RolePrecedence,
    /// Restrict students to their own submissions and lecturers to the ones
    /// they supervise or examine
    pub enforce_ownership: bool,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            precedence: RolePrecedence::default(),
            enforce_ownership: true,
        }
    }
}

/// Outcome of a successful transition request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Status written, record reflects the new state
    Applied(SemproRecord),
    /// Requested status equals the current one; nothing written
    Unchanged(SemproRecord),
}

impl TransitionOutcome {
    pub fn record(&self) -> &SemproRecord {
        match self {
            TransitionOutcome::Applied(record) | TransitionOutcome::Unchanged(record) => record,
        }
    }
}

pub struct SemproWorkflow<S: RecordStore> {
    store: S,
    options: WorkflowOptions,
}

impl<S: RecordStore> SemproWorkflow<S> {
    pub fn new(store: S) -> Self {
        Self::with_options(store, WorkflowOptions::default())
    }

    pub fn with_options(store: S, options: WorkflowOptions) -> Self {
        Self { store, options }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a new submission in `registered`
    pub fn submit(
        &self,
        student_id: &str,
        title: &str,
        supervisor_ids: Vec<String>,
        examiner_ids: Vec<String>,
    ) -> Result<SemproRecord, WorkflowError> {
        let record = SemproRecord::new(student_id, title, supervisor_ids, examiner_ids);
        let id = self.store.insert(record)?;
        tracing::info!(record_id = id, student_id = %student_id, "Seminar proposal registered");
        self.store.get(id)
    }

    /// Move record `id` to `requested` on behalf of `actor_id` holding `held_roles`
    pub fn request_transition(
        &self,
        id: u64,
        actor_id: &str,
        held_roles: &[Role],
        requested: Status,
    ) -> Result<TransitionOutcome, WorkflowError> {
        let span = create_transition_span("request_transition", id, Some(actor_id));
        let _guard = span.enter();

        let record = self.store.get(id)?;
        let role = self.authorize(&record, actor_id, held_roles)?;
        let current = record.status;

        if !is_valid_transition(current, requested, role) {
            tracing::warn!(role = %role, from = %current, to = %requested, "Transition denied");
            return Err(WorkflowError::Denied {
                from: current,
                to: requested,
                role,
            });
        }

        if current == requested {
            tracing::debug!(status = %current, "Transition to same status, nothing to write");
            return Ok(TransitionOutcome::Unchanged(record));
        }

        let reason = transition_reason(current, requested);
        let entry = TransitionRecord {
            from: current,
            to: requested,
            actor_id: Some(actor_id.to_string()),
            kind: TransitionKind::Role(role),
            reason: reason.to_string(),
            at: Utc::now(),
        };

        let updated = self.store.update_status(id, record.version, requested, entry)?;
        tracing::info!(
            role = %role,
            from = %current,
            to = %requested,
            reason = reason,
            "Transition applied"
        );
        Ok(TransitionOutcome::Applied(updated))
    }

    /// Apply the move `event` makes eligible. The caller is responsible for
    /// having observed the event.
    pub fn apply_system_event(&self, id: u64, event: SystemEvent) -> Result<SemproRecord, WorkflowError> {
        let span = create_transition_span("apply_system_event", id, None);
        let _guard = span.enter();

        let record = self.store.get(id)?;
        let current = record.status;

        let Some(target) = system_transition(current, event) else {
            tracing::warn!(status = %current, event = %event, "System event not applicable");
            return Err(WorkflowError::NotEligible {
                status: current,
                event,
            });
        };

        let reason = transition_reason(current, target);
        let entry = TransitionRecord {
            from: current,
            to: target,
            actor_id: None,
            kind: TransitionKind::System(event),
            reason: reason.to_string(),
            at: Utc::now(),
        };

        let updated = self.store.update_status(id, record.version, target, entry)?;
        tracing::info!(
            event = %event,
            from = %current,
            to = %target,
            "System transition applied"
        );
        Ok(updated)
    }

    /// Statuses the caller may move record `id` to. Empty when they may act
    /// on it but have no legal move.
    pub fn available_actions(
        &self,
        id: u64,
        actor_id: &str,
        held_roles: &[Role],
    ) -> Result<&'static [Status], WorkflowError> {
        let record = self.store.get(id)?;
        let role = self.authorize(&record, actor_id, held_roles)?;
        Ok(possible_transitions(record.status, role))
    }

    /// Effective role of the caller on `record`. With ownership enforced,
    /// only held roles the caller can exercise on this submission compete
    /// for precedence, so a lecturer who is also the owning student still
    /// acts as the student on their own proposal.
    fn authorize(&self, record: &SemproRecord, actor_id: &str, held_roles: &[Role]) -> Result<Role, WorkflowError> {
        let precedence = &self.options.precedence;
        let strongest = precedence.resolve(held_roles).ok_or(WorkflowError::NoRole)?;

        if !self.options.enforce_ownership {
            return Ok(strongest);
        }

        let usable: Vec<Role> = held_roles
            .iter()
            .copied()
            .filter(|role| {
                role.is_administrative()
                    || match role {
                        Role::Mahasiswa => record.is_owned_by(actor_id),
                        Role::Dosen => record.is_lecturer(actor_id),
                        Role::Tendik | Role::Koorpro => false,
                    }
            })
            .collect();

        match precedence.resolve(&usable) {
            Some(role) => Ok(role),
            None => {
                tracing::warn!(role = %strongest, "Caller is not a participant");
                Err(WorkflowError::NotParticipant {
                    record_id: record.id,
                    role: strongest,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sempro::store::InMemoryRecordStore;

    fn workflow() -> SemproWorkflow<InMemoryRecordStore> {
        SemproWorkflow::new(InMemoryRecordStore::new())
    }

    fn submit(wf: &SemproWorkflow<InMemoryRecordStore>) -> SemproRecord {
        wf.submit(
            "2110001",
            "Sentiment analysis of campus feedback",
            vec!["dosen01".to_string()],
            vec!["dosen02".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_full_happy_path() {
        let wf = workflow();
        let record = submit(&wf);
        assert_eq!(record.status, Status::Registered);

        wf.request_transition(record.id, "staff01", &[Role::Tendik], Status::Verified)
            .unwrap();
        wf.request_transition(record.id, "koor01", &[Role::Dosen, Role::Koorpro], Status::Scheduled)
            .unwrap();
        wf.apply_system_event(record.id, SystemEvent::AllEvaluationsRecorded)
            .unwrap();
        let approved = wf
            .apply_system_event(record.id, SystemEvent::AllApprovalsCollected)
            .unwrap();

        assert_eq!(approved.status, Status::Approved);
        assert_eq!(approved.version, 4);
        let reasons: Vec<&str> = approved.history.iter().map(|h| h.reason.as_str()).collect();
        assert_eq!(
            reasons,
            vec![
                "document verified and complete",
                "seminar has been scheduled",
                "all evaluations completed",
                "seminar approved by both supervisors",
            ]
        );
        assert_eq!(approved.history[2].actor_id, None);
    }

    #[test]
    fn test_denied_transition_leaves_record_untouched() {
        let wf = workflow();
        let record = submit(&wf);

        let err = wf
            .request_transition(record.id, "staff01", &[Role::Tendik], Status::Scheduled)
            .unwrap_err();

        assert!(err.is_denial());
        assert!(matches!(
            err,
            WorkflowError::Denied { from: Status::Registered, to: Status::Scheduled, role: Role::Tendik }
        ));
        let stored = wf.store().get(record.id).unwrap();
        assert_eq!(stored.status, Status::Registered);
        assert_eq!(stored.version, 0);
    }

    #[test]
    fn test_same_status_is_unchanged() {
        let wf = workflow();
        let record = submit(&wf);

        let outcome = wf
            .request_transition(record.id, "2110001", &[Role::Mahasiswa], Status::Registered)
            .unwrap();

        assert!(matches!(outcome, TransitionOutcome::Unchanged(_)));
        assert_eq!(outcome.record().version, 0);
    }

    #[test]
    fn test_student_cannot_touch_other_submission() {
        let wf = workflow();
        let record = submit(&wf);

        let err = wf
            .request_transition(record.id, "2110999", &[Role::Mahasiswa], Status::Registered)
            .unwrap_err();

        assert!(matches!(err, WorkflowError::NotParticipant { .. }));
    }

    #[test]
    fn test_examiner_requests_revision_and_student_resubmits() {
        let wf = workflow();
        let record = submit(&wf);
        wf.request_transition(record.id, "staff01", &[Role::Tendik], Status::Verified).unwrap();
        wf.request_transition(record.id, "staff01", &[Role::Tendik], Status::Scheduled).unwrap();
        wf.apply_system_event(record.id, SystemEvent::AllEvaluationsRecorded).unwrap();

        let outsider = wf
            .request_transition(record.id, "dosen77", &[Role::Dosen], Status::RevisionRequired)
            .unwrap_err();
        assert!(matches!(outsider, WorkflowError::NotParticipant { .. }));

        wf.request_transition(record.id, "dosen02", &[Role::Dosen], Status::RevisionRequired)
            .unwrap();
        let outcome = wf
            .request_transition(record.id, "2110001", &[Role::Mahasiswa], Status::Registered)
            .unwrap();

        assert_eq!(outcome.record().status, Status::Registered);
        assert_eq!(
            outcome.record().history.last().map(|h| h.reason.as_str()),
            Some("revision uploaded and pending verification")
        );
    }

    #[test]
    fn test_lecturer_who_is_also_owner_acts_as_student() {
        let wf = workflow();
        let record = submit(&wf);
        wf.request_transition(record.id, "staff01", &[Role::Tendik], Status::Verified).unwrap();
        wf.request_transition(record.id, "staff01", &[Role::Tendik], Status::Scheduled).unwrap();
        wf.apply_system_event(record.id, SystemEvent::AllEvaluationsRecorded).unwrap();
        wf.request_transition(record.id, "dosen02", &[Role::Dosen], Status::RevisionRequired)
            .unwrap();

        let held = [Role::Mahasiswa, Role::Dosen];
        let actions = wf.available_actions(record.id, "2110001", &held).unwrap();
        assert_eq!(actions, &[Status::Registered]);

        let outcome = wf
            .request_transition(record.id, "2110001", &held, Status::Registered)
            .unwrap();
        assert_eq!(outcome.record().status, Status::Registered);
        assert_eq!(
            outcome.record().history.last().map(|h| h.kind.clone()),
            Some(TransitionKind::Role(Role::Mahasiswa))
        );
    }

    #[test]
    fn test_multi_role_outsider_reports_strongest_role() {
        let wf = workflow();
        let record = submit(&wf);

        let err = wf
            .available_actions(record.id, "dosen77", &[Role::Mahasiswa, Role::Dosen])
            .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::NotParticipant { role: Role::Dosen, .. }
        ));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_transition_logs_carry_record_and_actor() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();

        let wf = workflow();
        let record = tracing::subscriber::with_default(subscriber, || {
            let record = submit(&wf);
            wf.request_transition(record.id, "staff01", &[Role::Tendik], Status::Verified)
                .unwrap();
            wf.request_transition(record.id, "staff01", &[Role::Tendik], Status::Scheduled)
                .unwrap();
            wf.apply_system_event(record.id, SystemEvent::AllEvaluationsRecorded)
                .unwrap()
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let applied: Vec<&str> = output
            .lines()
            .filter(|line| line.contains("Transition applied"))
            .collect();
        assert_eq!(applied.len(), 2);
        for line in &applied {
            assert!(line.contains("sempro_transition"), "{line}");
            assert!(line.contains(&format!("record.id={}", record.id)), "{line}");
            assert!(line.contains("request_transition"), "{line}");
            assert!(line.contains("staff01"), "{line}");
        }

        let system = output
            .lines()
            .find(|line| line.contains("System transition applied"))
            .unwrap();
        assert!(system.contains("apply_system_event"), "{system}");
        assert!(!system.contains("actor.id"), "{system}");
    }

    #[test]
    fn test_ownership_can_be_disabled() {
        let options = WorkflowOptions {
            enforce_ownership: false,
            ..WorkflowOptions::default()
        };
        let wf = SemproWorkflow::with_options(InMemoryRecordStore::new(), options);
        let record = submit(&wf);

        let actions = wf.available_actions(record.id, "anyone", &[Role::Mahasiswa]).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_no_role_is_denied() {
        let wf = workflow();
        let record = submit(&wf);
        let err = wf.available_actions(record.id, "ghost", &[]).unwrap_err();
        assert!(matches!(err, WorkflowError::NoRole));
    }

    #[test]
    fn test_system_event_not_eligible() {
        let wf = workflow();
        let record = submit(&wf);
        let err = wf
            .apply_system_event(record.id, SystemEvent::AllApprovalsCollected)
            .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::NotEligible { status: Status::Registered, .. }
        ));
        assert!(!err.is_denial());
    }
}
