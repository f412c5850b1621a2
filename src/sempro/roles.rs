use super::types::Role;

/// Default precedence, highest first: coordinator and staff over lecturer over
/// student.
pub const DEFAULT_PRECEDENCE: [Role; 4] = [Role::Koorpro, Role::Tendik, Role::Dosen, Role::Mahasiswa];

/// Ordering used to pick one effective role from the roles a user holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePrecedence {
    order: Vec<Role>,
}

impl Default for RolePrecedence {
    fn default() -> Self {
        Self {
            order: DEFAULT_PRECEDENCE.to_vec(),
        }
    }
}

impl RolePrecedence {
    /// Custom ordering, highest first. Duplicates keep their first position;
    /// roles left out are never selected.
    pub fn new(order: impl IntoIterator<Item = Role>) -> Self {
        let mut deduped = Vec::new();
        for role in order {
            if !deduped.contains(&role) {
                deduped.push(role);
            }
        }
        Self { order: deduped }
    }

    pub fn order(&self) -> &[Role] {
        &self.order
    }

    /// Rank of `role`, lower is stronger. `None` if the ordering omits it.
    pub fn rank(&self, role: Role) -> Option<usize> {
        self.order.iter().position(|r| *r == role)
    }

    /// Highest-ranked role among `held`
    pub fn resolve(&self, held: &[Role]) -> Option<Role> {
        let mut best: Option<(usize, Role)> = None;

        for &role in held {
            let Some(rank) = self.rank(role) else {
                continue;
            };
            if best.map_or(true, |(best_rank, _)| rank < best_rank) {
                best = Some((rank, role));
            }
        }

        best.map(|(_, role)| role)
    }
}

/// Effective role under the default precedence
pub fn resolve_effective_role(held: &[Role]) -> Option<Role> {
    RolePrecedence::default().resolve(held)
}
