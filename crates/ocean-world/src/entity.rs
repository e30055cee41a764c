//! Entity state and per-kind constants.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const PREY_MATURE_AGE: u32 = 2;
pub const PREY_MAX_AGE: u32 = 7;

pub const PREDATOR_MATURE_AGE: u32 = 5;
pub const PREDATOR_MAX_AGE: u32 = 15;
/// A predator starves once its hunger exceeds this
pub const PREDATOR_MAX_HUNGER: u32 = 6;
/// Predators only breed while hunger is at or below this
pub const PREDATOR_BREED_HUNGER: u32 = 5;

pub const APEX_MATURE_AGE: u32 = 10;
pub const APEX_MAX_AGE: u32 = 18;
/// An apex predator starves once its hunger reaches this
pub const APEX_STARVATION_HUNGER: u32 = 7;
/// From this hunger on, apex predators also hunt predators
pub const APEX_FRENZY_HUNGER: u32 = 5;
pub const APEX_BREED_HUNGER: u32 = 3;

/// Hunger levels at which hunters speed up
pub const HUNTER_SPEEDUP_HUNGER: u32 = 2;
pub const APEX_SECOND_SPEEDUP_HUNGER: u32 = 5;

pub const STONE_TO_REEF_AGE: u32 = 8;
pub const REEF_TO_STONE_AGE: u32 = 4;

pub const BASE_SPEED: u32 = 1;

/// Unique identifier for an entity, allocated by the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind tag of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Prey,
    Predator,
    ApexPredator,
    Stone,
    Reef,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Prey,
        EntityKind::Predator,
        EntityKind::ApexPredator,
        EntityKind::Stone,
        EntityKind::Reef,
    ];

    /// Character used when rendering the grid
    pub fn symbol(&self) -> char {
        match self {
            EntityKind::Prey => 'F',
            EntityKind::Predator => 'P',
            EntityKind::ApexPredator => 'A',
            EntityKind::Stone => '#',
            EntityKind::Reef => 'R',
        }
    }

    pub fn is_hunter(&self) -> bool {
        matches!(self, EntityKind::Predator | EntityKind::ApexPredator)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Prey => "prey",
            EntityKind::Predator => "predator",
            EntityKind::ApexPredator => "apex_predator",
            EntityKind::Stone => "stone",
            EntityKind::Reef => "reef",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreyState {
    pub speed: u32,
    /// Set while a reef is adjacent; hunters leave shielded prey alone
    pub shielded: bool,
}

impl Default for PreyState {
    fn default() -> Self {
        Self {
            speed: BASE_SPEED,
            shielded: false,
        }
    }
}

/// Mutable state shared by predators and apex predators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunterState {
    pub speed: u32,
    pub hunger: u32,
}

impl Default for HunterState {
    fn default() -> Self {
        Self {
            speed: BASE_SPEED,
            hunger: 0,
        }
    }
}

impl HunterState {
    /// Reset after a successful kill
    pub fn fed(&mut self) {
        self.hunger = 0;
        self.speed = BASE_SPEED;
    }
}

/// Kind-specific state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Species {
    Prey(PreyState),
    Predator(HunterState),
    ApexPredator(HunterState),
    Stone,
    Reef,
}

impl Species {
    pub fn fresh(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Prey => Species::Prey(PreyState::default()),
            EntityKind::Predator => Species::Predator(HunterState::default()),
            EntityKind::ApexPredator => Species::ApexPredator(HunterState::default()),
            EntityKind::Stone => Species::Stone,
            EntityKind::Reef => Species::Reef,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Species::Prey(_) => EntityKind::Prey,
            Species::Predator(_) => EntityKind::Predator,
            Species::ApexPredator(_) => EntityKind::ApexPredator,
            Species::Stone => EntityKind::Stone,
            Species::Reef => EntityKind::Reef,
        }
    }
}

/// An entity living in one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub age: u32,
    pub alive: bool,
    /// Last tick in which this entity was evaluated (or the tick it was created in)
    pub acted_tick: u64,
    pub species: Species,
}

impl Entity {
    pub fn new(id: EntityId, species: Species, tick: u64) -> Self {
        Self {
            id,
            age: 0,
            alive: true,
            acted_tick: tick,
            species,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.species.kind()
    }

    pub fn symbol(&self) -> char {
        self.kind().symbol()
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn mark_dead(&mut self) {
        self.alive = false;
    }

    /// Current hunger, for kinds that get hungry
    pub fn hunger(&self) -> Option<u32> {
        match self.species {
            Species::Predator(hunter) | Species::ApexPredator(hunter) => Some(hunter.hunger),
            _ => None,
        }
    }

    /// Age beyond which the entity dies; stones and reefs never do
    pub fn max_age(&self) -> Option<u32> {
        match self.species {
            Species::Prey(_) => Some(PREY_MAX_AGE),
            Species::Predator(_) => Some(PREDATOR_MAX_AGE),
            Species::ApexPredator(_) => Some(APEX_MAX_AGE),
            Species::Stone | Species::Reef => None,
        }
    }

    pub fn is_mature(&self) -> bool {
        match self.species {
            Species::Prey(_) => self.age >= PREY_MATURE_AGE,
            Species::Predator(_) => self.age >= PREDATOR_MATURE_AGE,
            Species::ApexPredator(_) => self.age >= APEX_MATURE_AGE,
            Species::Stone | Species::Reef => false,
        }
    }

    /// Mature and fed well enough to breed. Being flagged dead does not matter.
    pub fn can_breed(&self) -> bool {
        if !self.is_mature() {
            return false;
        }
        match self.species {
            Species::Prey(_) => true,
            Species::Predator(hunter) => hunter.hunger <= PREDATOR_BREED_HUNGER,
            Species::ApexPredator(hunter) => hunter.hunger <= APEX_BREED_HUNGER,
            Species::Stone | Species::Reef => false,
        }
    }

    /// Live prey that no reef is shielding
    pub fn is_vulnerable_prey(&self) -> bool {
        matches!(self.species, Species::Prey(prey) if self.alive && !prey.shielded)
    }
}

/// Weighted draw used to seed a fresh grid, as percentages out of 100
pub const SPAWN_WEIGHTS: [(Option<EntityKind>, u32); 6] = [
    (None, 50),
    (Some(EntityKind::Prey), 25),
    (Some(EntityKind::Predator), 15),
    (Some(EntityKind::Stone), 5),
    (Some(EntityKind::Reef), 3),
    (Some(EntityKind::ApexPredator), 2),
];

/// Map a roll in `0..100` onto the spawn table
pub fn kind_for_roll(roll: u32) -> Option<EntityKind> {
    let mut threshold = 0;
    for (kind, weight) in SPAWN_WEIGHTS {
        threshold += weight;
        if roll < threshold {
            return kind;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(species: Species) -> Entity {
        Entity::new(EntityId(1), species, 0)
    }

    #[test]
    fn test_fresh_state() {
        for kind in EntityKind::ALL {
            let e = entity(Species::fresh(kind));
            assert_eq!(e.kind(), kind);
            assert_eq!(e.age, 0);
            assert!(e.is_alive());
        }

        let predator = entity(Species::fresh(EntityKind::Predator));
        assert_eq!(predator.hunger(), Some(0));
        assert_eq!(entity(Species::Stone).hunger(), None);
        assert_eq!(entity(Species::Reef).max_age(), None);
    }

    #[test]
    fn test_symbols() {
        let symbols: String = EntityKind::ALL.iter().map(|k| k.symbol()).collect();
        assert_eq!(symbols, "FPA#R");
    }

    #[test]
    fn test_maturity_thresholds() {
        let mut prey = entity(Species::fresh(EntityKind::Prey));
        prey.age = 1;
        assert!(!prey.is_mature());
        prey.age = 2;
        assert!(prey.is_mature());

        let mut apex = entity(Species::fresh(EntityKind::ApexPredator));
        apex.age = 10;
        assert!(apex.can_breed());
        apex.species = Species::ApexPredator(HunterState { speed: 1, hunger: 4 });
        assert!(!apex.can_breed());
    }

    #[test]
    fn test_vulnerable_prey() {
        let mut prey = entity(Species::fresh(EntityKind::Prey));
        assert!(prey.is_vulnerable_prey());

        prey.species = Species::Prey(PreyState { speed: 1, shielded: true });
        assert!(!prey.is_vulnerable_prey());

        let mut dead = entity(Species::fresh(EntityKind::Prey));
        dead.mark_dead();
        assert!(!dead.is_vulnerable_prey());
    }

    #[test]
    fn test_spawn_table_boundaries() {
        assert_eq!(SPAWN_WEIGHTS.iter().map(|(_, w)| w).sum::<u32>(), 100);
        assert_eq!(kind_for_roll(0), None);
        assert_eq!(kind_for_roll(49), None);
        assert_eq!(kind_for_roll(50), Some(EntityKind::Prey));
        assert_eq!(kind_for_roll(74), Some(EntityKind::Prey));
        assert_eq!(kind_for_roll(75), Some(EntityKind::Predator));
        assert_eq!(kind_for_roll(90), Some(EntityKind::Stone));
        assert_eq!(kind_for_roll(95), Some(EntityKind::Reef));
        assert_eq!(kind_for_roll(98), Some(EntityKind::ApexPredator));
        assert_eq!(kind_for_roll(99), Some(EntityKind::ApexPredator));
    }
}
