use anyhow::{bail, Result};

use crate::sempro::{Role, RolePrecedence};

pub struct ResolveCommand {
    pub roles: Vec<Role>,
    pub precedence: RolePrecedence,
}

impl ResolveCommand {
    pub fn new(roles: Vec<Role>) -> Self {
        Self {
            roles,
            precedence: RolePrecedence::default(),
        }
    }

    pub fn with_precedence(mut self, precedence: RolePrecedence) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn execute(&self) -> Result<Role> {
        let Some(role) = self.precedence.resolve(&self.roles) else {
            bail!("none of the given roles is part of the configured precedence");
        };
        println!("{role}");
        Ok(role)
    }
}
