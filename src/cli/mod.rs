use clap::{Parser, Subcommand};

use crate::sempro::{Role, Status};

pub mod commands;

#[derive(Parser)]
#[command(name = "sitasi")]
#[command(about = "Seminar proposal workflow policy for SITASI ITK")]
#[command(long_about = "Inspect which role may move a seminar proposal between workflow statuses, \
                       the audit text recorded for each move, and how multi-role users are resolved.")]
pub struct Cli {
    /// Print human-readable logs instead of JSON
    #[arg(long, global = true)]
    pub plain_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether a role may move a submission between two statuses
    Check {
        /// Current status (e.g. registered, revision_required)
        current: Status,
        /// Requested status
        requested: Status,
        /// Acting role: mahasiswa, dosen, tendik or koorpro
        #[arg(long, short = 'r')]
        role: Role,
    },
    /// List the statuses a role may move a submission to
    Options {
        /// Current status
        current: Status,
        /// Acting role
        #[arg(long, short = 'r')]
        role: Role,
    },
    /// Show the audit text recorded for a status change
    Reason {
        /// Previous status
        current: Status,
        /// New status
        requested: Status,
    },
    /// Print the full role transition table
    Table {
        /// Emit JSON instead of a text table
        #[arg(long)]
        json: bool,
    },
    /// Resolve the effective role of a user holding several roles
    Resolve {
        /// Roles held by the user
        #[arg(required = true)]
        roles: Vec<Role>,
    },
    /// Run a submission through the workflow using an in-memory store
    Simulate {
        /// Have the examiner request a revision instead of collecting approvals
        #[arg(long)]
        with_revision: bool,
    },
}
