//! The four orthogonal neighbors of a cell, as seen at evaluation time.

use crate::entity::{Entity, EntityKind};
use ocean_core::{Direction, Position};

/// An occupied neighboring cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub direction: Direction,
    pub position: Position,
    pub entity: Entity,
}

/// Neighbor slots in [`Direction::SCAN_ORDER`].
///
/// Occupants are copied out of the grid when the neighborhood is built, so
/// the view reflects every mutation made earlier in the same tick but is
/// not affected by what the evaluated entity does afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood {
    center: Position,
    positions: [Position; 4],
    slots: [Option<Entity>; 4],
}

impl Neighborhood {
    pub fn new(center: Position, positions: [Position; 4], slots: [Option<Entity>; 4]) -> Self {
        Self {
            center,
            positions,
            slots,
        }
    }

    pub fn center(&self) -> Position {
        self.center
    }

    pub fn position(&self, direction: Direction) -> Position {
        self.positions[direction.slot()]
    }

    pub fn slot(&self, direction: Direction) -> Option<&Entity> {
        self.slots[direction.slot()].as_ref()
    }

    /// Every slot in scan order, empty or not
    pub fn iter(&self) -> impl Iterator<Item = (Direction, Position, Option<&Entity>)> + '_ {
        Direction::SCAN_ORDER
            .into_iter()
            .map(move |d| (d, self.position(d), self.slot(d)))
    }

    /// Occupied slots in scan order, excluding the evaluated cell itself.
    ///
    /// On grids with a single row or column a slot can wrap around onto the
    /// center cell; an entity never counts as its own neighbor.
    pub fn occupants(&self) -> impl Iterator<Item = Neighbor> + '_ {
        self.iter().filter_map(move |(direction, position, slot)| {
            if position == self.center {
                return None;
            }
            slot.map(|entity| Neighbor {
                direction,
                position,
                entity: *entity,
            })
        })
    }

    /// First neighbor in scan order satisfying `predicate`
    pub fn find(&self, mut predicate: impl FnMut(&Entity) -> bool) -> Option<Neighbor> {
        self.occupants().find(|n| predicate(&n.entity))
    }

    pub fn contains_kind(&self, kind: EntityKind) -> bool {
        self.occupants().any(|n| n.entity.kind() == kind)
    }

    /// First empty slot in scan order
    pub fn first_empty(&self) -> Option<(Direction, Position)> {
        self.iter()
            .find(|(_, _, slot)| slot.is_none())
            .map(|(direction, position, _)| (direction, position))
    }

    pub fn empty_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_none()).count()
    }
}
