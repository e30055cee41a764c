//! Population counts per entity kind.

use crate::entity::EntityKind;
use crate::grid::Grid;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub prey: usize,
    pub predators: usize,
    pub apex_predators: usize,
    pub stones: usize,
    pub reefs: usize,
    /// Cells with no live occupant
    pub empty: usize,
}

impl Census {
    pub fn of(grid: &Grid) -> Self {
        let mut census = Census::default();
        for (_, entity) in grid.iter().filter(|(_, e)| e.is_alive()) {
            *census.count_mut(entity.kind()) += 1;
        }
        census.empty = grid.rows() * grid.cols() - census.occupied();
        census
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Prey => self.prey,
            EntityKind::Predator => self.predators,
            EntityKind::ApexPredator => self.apex_predators,
            EntityKind::Stone => self.stones,
            EntityKind::Reef => self.reefs,
        }
    }

    fn count_mut(&mut self, kind: EntityKind) -> &mut usize {
        match kind {
            EntityKind::Prey => &mut self.prey,
            EntityKind::Predator => &mut self.predators,
            EntityKind::ApexPredator => &mut self.apex_predators,
            EntityKind::Stone => &mut self.stones,
            EntityKind::Reef => &mut self.reefs,
        }
    }

    /// Live animals, i.e. everything except stones and reefs
    pub fn animals(&self) -> usize {
        self.prey + self.predators + self.apex_predators
    }

    pub fn occupied(&self) -> usize {
        self.animals() + self.stones + self.reefs
    }
}
