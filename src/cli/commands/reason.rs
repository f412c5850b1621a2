use anyhow::Result;

use crate::sempro::{transition_reason, Status};

pub struct ReasonCommand {
    pub current: Status,
    pub requested: Status,
}

impl ReasonCommand {
    pub fn new(current: Status, requested: Status) -> Self {
        Self { current, requested }
    }

    pub fn execute(&self) -> Result<()> {
        println!("{}", transition_reason(self.current, self.requested));
        Ok(())
    }
}
