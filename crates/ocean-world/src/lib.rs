//! Ocean simulation engine.
//!
//! A toroidal grid of prey, predators, apex predators, stones and reefs that
//! age, move, hunt, breed and transform one tick at a time.

pub mod behavior;
pub mod census;
pub mod entity;
pub mod grid;
pub mod neighborhood;
pub mod simulation;

pub use behavior::{Action, TickEvents};
pub use census::Census;
pub use entity::{Entity, EntityId, EntityKind, Species};
pub use grid::Grid;
pub use neighborhood::Neighborhood;
pub use simulation::{RunSummary, Simulation, TickReport};
