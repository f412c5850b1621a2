use anyhow::Result;

use crate::sempro::{
    InMemoryRecordStore, RecordStore, Role, SemproRecord, SemproWorkflow, Status, SystemEvent, TransitionKind,
    WorkflowOptions,
};

const STUDENT: &str = "2110001";
const SUPERVISOR: &str = "dosen01";
const EXAMINER: &str = "dosen02";
const STAFF: &str = "tendik01";

pub struct SimulateCommand {
    pub with_revision: bool,
    pub options: WorkflowOptions,
    pub history_limit: usize,
}

impl SimulateCommand {
    pub fn new(with_revision: bool) -> Self {
        Self {
            with_revision,
            options: WorkflowOptions::default(),
            history_limit: InMemoryRecordStore::DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_options(mut self, options: WorkflowOptions, history_limit: usize) -> Self {
        self.options = options;
        self.history_limit = history_limit;
        self
    }

    /// Drives one submission to a final status and returns it
    pub fn execute(&self) -> Result<SemproRecord> {
        let store = InMemoryRecordStore::with_history_limit(self.history_limit);
        let workflow = SemproWorkflow::with_options(store, self.options.clone());

        let record = workflow.submit(
            STUDENT,
            "Klasifikasi dokumen tugas akhir",
            vec![SUPERVISOR.to_string()],
            vec![EXAMINER.to_string()],
        )?;
        let id = record.id;

        workflow.request_transition(id, STAFF, &[Role::Tendik], Status::Verified)?;
        workflow.request_transition(id, STAFF, &[Role::Tendik], Status::Scheduled)?;
        workflow.apply_system_event(id, SystemEvent::AllEvaluationsRecorded)?;

        if self.with_revision {
            workflow.request_transition(id, EXAMINER, &[Role::Dosen], Status::RevisionRequired)?;
            workflow.request_transition(id, STUDENT, &[Role::Mahasiswa], Status::Registered)?;
        } else {
            workflow.apply_system_event(id, SystemEvent::AllApprovalsCollected)?;
        }

        let record = workflow.store().get(id)?;
        for entry in &record.history {
            let initiator = match entry.kind {
                TransitionKind::Role(role) => role.to_string(),
                TransitionKind::System(event) => format!("system ({event})"),
            };
            println!(
                "{:<18} -> {:<18} by {:<28} {}",
                entry.from, entry.to, initiator, entry.reason
            );
        }
        println!("final status: {}", record.status);

        Ok(record)
    }
}
