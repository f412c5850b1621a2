use anyhow::Result;

use super::format_statuses;
use crate::sempro::{is_valid_transition, possible_transitions, transition_reason, Role, Status};

pub struct CheckCommand {
    pub current: Status,
    pub requested: Status,
    pub role: Role,
}

impl CheckCommand {
    pub fn new(current: Status, requested: Status, role: Role) -> Self {
        Self {
            current,
            requested,
            role,
        }
    }

    /// Prints the verdict; `Ok(false)` means the move is denied
    pub fn execute(&self) -> Result<bool> {
        let allowed = is_valid_transition(self.current, self.requested, self.role);

        if allowed {
            println!(
                "allowed: {} may move {} -> {}",
                self.role, self.current, self.requested
            );
            if self.current != self.requested {
                println!("reason:  {}", transition_reason(self.current, self.requested));
            }
        } else {
            println!(
                "denied:  {} may not move {} -> {}",
                self.role, self.current, self.requested
            );
            println!(
                "options: {}",
                format_statuses(possible_transitions(self.current, self.role))
            );
        }

        Ok(allowed)
    }
}

pub struct OptionsCommand {
    pub current: Status,
    pub role: Role,
}

impl OptionsCommand {
    pub fn new(current: Status, role: Role) -> Self {
        Self { current, role }
    }

    pub fn execute(&self) -> Result<()> {
        let targets = possible_transitions(self.current, self.role);
        if targets.is_empty() {
            println!("{} has no available action on a {} submission", self.role, self.current);
            return Ok(());
        }

        println!("{} may move a {} submission to:", self.role, self.current);
        for target in targets {
            println!("  {:<18} {}", target, transition_reason(self.current, *target));
        }
        Ok(())
    }
}
