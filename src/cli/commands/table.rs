use anyhow::Result;
use serde::Serialize;

use super::format_statuses;
use crate::sempro::{transition_table, Role, Status};

#[derive(Debug, Serialize)]
struct TableEntry {
    current: Status,
    role: Role,
    allowed: &'static [Status],
}

pub struct TableCommand {
    pub json: bool,
}

impl TableCommand {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn execute(&self) -> Result<()> {
        if self.json {
            let entries: Vec<TableEntry> = transition_table()
                .map(|(current, role, allowed)| TableEntry {
                    current,
                    role,
                    allowed,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(());
        }

        print!("{:<18}", "current");
        for role in Role::ALL {
            print!(" | {:<20}", role);
        }
        println!();

        for status in Status::ALL {
            print!("{:<18}", status);
            for role in Role::ALL {
                let targets: Vec<Status> = transition_table()
                    .filter(|(s, r, _)| *s == status && *r == role)
                    .flat_map(|(_, _, allowed)| allowed.iter().copied())
                    .collect();
                print!(" | {:<20}", format_statuses(&targets));
            }
            println!();
        }
        Ok(())
    }
}
