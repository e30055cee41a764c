//! Per-kind decision logic.
//!
//! Each entity looks at its four neighbors and decides what to do this tick.
//! Predation, breeding and stone/reef transformation are written to the
//! grid straight away; only movement is handed back to the tick driver as
//! an [`Action`].

use crate::entity::{
    Entity, EntityKind, HunterState, Species, APEX_BREED_HUNGER, APEX_FRENZY_HUNGER,
    APEX_MAX_AGE, APEX_SECOND_SPEEDUP_HUNGER, APEX_STARVATION_HUNGER, HUNTER_SPEEDUP_HUNGER,
    PREDATOR_MAX_AGE, PREDATOR_MAX_HUNGER, PREY_MAX_AGE, REEF_TO_STONE_AGE, STONE_TO_REEF_AGE,
};
use crate::grid::Grid;
use crate::neighborhood::{Neighbor, Neighborhood};
use ocean_core::{Direction, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Movement requested by an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    NoOp,
    Move { direction: Direction, distance: u32 },
}

impl Action {
    /// Move in a uniformly random direction
    pub fn wander<R: Rng + ?Sized>(rng: &mut R, distance: u32) -> Self {
        Action::Move {
            direction: Direction::random(rng),
            distance,
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickEvents {
    pub births: u64,
    pub kills: u64,
    pub transformations: u64,
    pub starved: u64,
    pub died_of_age: u64,
    pub moves: u64,
    pub blocked_moves: u64,
}

impl TickEvents {
    pub fn absorb(&mut self, other: &TickEvents) {
        self.births += other.births;
        self.kills += other.kills;
        self.transformations += other.transformations;
        self.starved += other.starved;
        self.died_of_age += other.died_of_age;
        self.moves += other.moves;
        self.blocked_moves += other.blocked_moves;
    }

    pub fn deaths(&self) -> u64 {
        self.kills + self.starved + self.died_of_age
    }
}

/// Everything an entity may touch while it decides
pub struct TickContext<'a, R: Rng + ?Sized> {
    pub grid: &'a mut Grid,
    pub rng: &'a mut R,
    pub tick: u64,
    pub events: &'a mut TickEvents,
}

/// Run the occupant of `pos` for one tick.
///
/// The neighborhood is read from the live grid, so it already reflects
/// whatever entities evaluated earlier in this tick have done.
pub fn evaluate<R: Rng + ?Sized>(ctx: &mut TickContext<'_, R>, pos: Position) -> Action {
    let Some(mut entity) = ctx.grid.get(pos).copied() else {
        return Action::NoOp;
    };
    let neighborhood = ctx.grid.neighbors_of(pos);

    entity.acted_tick = ctx.tick;
    entity.age += 1;

    let action = match entity.species {
        Species::Stone => mineral_turn(ctx, &entity, pos, STONE_TO_REEF_AGE, EntityKind::Reef),
        Species::Reef => mineral_turn(ctx, &entity, pos, REEF_TO_STONE_AGE, EntityKind::Stone),
        Species::Prey(_) => prey_turn(ctx, &mut entity, &neighborhood),
        Species::Predator(_) => predator_turn(ctx, &mut entity, &neighborhood),
        Species::ApexPredator(_) => apex_turn(ctx, &mut entity, &neighborhood),
    };

    // Write our state back unless we were replaced in place
    if let Some(slot) = ctx.grid.get_mut(pos).filter(|e| e.id == entity.id) {
        *slot = entity;
    }

    action
}

fn mineral_turn<R: Rng + ?Sized>(
    ctx: &mut TickContext<'_, R>,
    me: &Entity,
    pos: Position,
    threshold: u32,
    into: EntityKind,
) -> Action {
    if me.age >= threshold {
        let id = ctx.grid.spawn(pos, Species::fresh(into), ctx.tick);
        ctx.events.transformations += 1;
        trace!(from = %me.kind(), to = %into, old = %me.id, new = %id, position = %pos, "Transformed");
    }
    Action::NoOp
}

fn prey_turn<R: Rng + ?Sized>(
    ctx: &mut TickContext<'_, R>,
    me: &mut Entity,
    hood: &Neighborhood,
) -> Action {
    if me.age > PREY_MAX_AGE {
        return die(ctx, me, DeathCause::OldAge);
    }

    let speed = match me.species {
        Species::Prey(state) => state.speed,
        _ => return Action::NoOp,
    };

    if let Some(threat) = hood.find(|e| e.kind().is_hunter()) {
        return Action::Move {
            direction: threat.direction.opposite(),
            distance: speed,
        };
    }

    let shielded = hood.contains_kind(EntityKind::Reef);
    if let Species::Prey(state) = &mut me.species {
        state.shielded = shielded;
    }

    if me.can_breed() && mate_ready(hood, EntityKind::Prey) {
        breed(ctx, me, hood);
    }

    Action::wander(ctx.rng, speed)
}

fn predator_turn<R: Rng + ?Sized>(
    ctx: &mut TickContext<'_, R>,
    me: &mut Entity,
    hood: &Neighborhood,
) -> Action {
    if me.age > PREDATOR_MAX_AGE {
        return die(ctx, me, DeathCause::OldAge);
    }
    if me.hunger().unwrap_or(0) > PREDATOR_MAX_HUNGER {
        return die(ctx, me, DeathCause::Starvation);
    }

    if let Some(target) = hood.find(Entity::is_vulnerable_prey) {
        return eat(ctx, me, target);
    }

    if me.can_breed() && mate_ready(hood, EntityKind::Predator) {
        breed(ctx, me, hood);
    }

    match hunter_mut(me) {
        Some(hunter) => {
            if hunter.hunger == HUNTER_SPEEDUP_HUNGER {
                hunter.speed += 1;
            }
            hunter.hunger += 1;
            let speed = hunter.speed;
            Action::wander(ctx.rng, speed)
        }
        None => Action::NoOp,
    }
}

fn apex_turn<R: Rng + ?Sized>(
    ctx: &mut TickContext<'_, R>,
    me: &mut Entity,
    hood: &Neighborhood,
) -> Action {
    let hunger = me.hunger().unwrap_or(0);
    if me.age > APEX_MAX_AGE {
        return die(ctx, me, DeathCause::OldAge);
    }
    if hunger >= APEX_STARVATION_HUNGER {
        return die(ctx, me, DeathCause::Starvation);
    }

    // Predators only become food once the apex is hungry enough
    let frenzied = hunger >= APEX_FRENZY_HUNGER;
    let target = hood.find(|e| {
        e.is_vulnerable_prey() || (frenzied && e.kind() == EntityKind::Predator && e.is_alive())
    });
    if let Some(target) = target {
        return eat(ctx, me, target);
    }

    if me.can_breed() && mate_ready(hood, EntityKind::ApexPredator) {
        breed(ctx, me, hood);
    }

    match hunter_mut(me) {
        Some(hunter) => {
            if hunter.hunger == HUNTER_SPEEDUP_HUNGER {
                hunter.speed += 1;
            }
            if hunter.hunger == APEX_SECOND_SPEEDUP_HUNGER {
                hunter.speed += 1;
            }
            hunter.hunger += 1;
            let speed = hunter.speed;
            Action::wander(ctx.rng, speed)
        }
        None => Action::NoOp,
    }
}

#[derive(Debug, Clone, Copy)]
enum DeathCause {
    OldAge,
    Starvation,
}

fn die<R: Rng + ?Sized>(ctx: &mut TickContext<'_, R>, me: &mut Entity, cause: DeathCause) -> Action {
    // Already-dead entities still take turns until the sweep; count each death once
    if !me.is_alive() {
        return Action::NoOp;
    }
    me.mark_dead();
    match cause {
        DeathCause::OldAge => ctx.events.died_of_age += 1,
        DeathCause::Starvation => ctx.events.starved += 1,
    }
    trace!(entity = %me.id, kind = %me.kind(), age = me.age, cause = ?cause, tick = ctx.tick, "Entity died");
    Action::NoOp
}

/// Kill `target` and reset the hunter. Eating takes the whole turn.
fn eat<R: Rng + ?Sized>(ctx: &mut TickContext<'_, R>, me: &mut Entity, target: Neighbor) -> Action {
    if let Some(victim) = ctx.grid.entity_mut(target.entity.id) {
        victim.mark_dead();
    }
    if let Some(hunter) = hunter_mut(me) {
        hunter.fed();
    }
    ctx.events.kills += 1;
    trace!(
        hunter = %me.id,
        hunter_kind = %me.kind(),
        victim = %target.entity.id,
        victim_kind = %target.entity.kind(),
        position = %target.position,
        tick = ctx.tick,
        "Kill"
    );
    Action::NoOp
}

/// The first neighbor of our kind decides; if it is not ready, nobody is
fn mate_ready(hood: &Neighborhood, kind: EntityKind) -> bool {
    hood.find(|e| e.kind() == kind)
        .is_some_and(|mate| mate.entity.can_breed())
}

/// Spawn a fresh entity of our kind into the first empty neighbor slot
fn breed<R: Rng + ?Sized>(ctx: &mut TickContext<'_, R>, parent: &Entity, hood: &Neighborhood) {
    let Some((direction, pos)) = hood.first_empty() else {
        trace!(parent = %parent.id, tick = ctx.tick, "Breeding skipped: no empty neighbor");
        return;
    };

    let kind = parent.kind();
    let child = ctx.grid.spawn(pos, Species::fresh(kind), ctx.tick);
    ctx.events.births += 1;
    trace!(
        parent = %parent.id,
        child = %child,
        kind = %kind,
        direction = ?direction,
        position = %pos,
        tick = ctx.tick,
        "Offspring spawned"
    );
}

fn hunter_mut(entity: &mut Entity) -> Option<&mut HunterState> {
    match &mut entity.species {
        Species::Predator(hunter) | Species::ApexPredator(hunter) => Some(hunter),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityId, PreyState};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const CENTER: Position = Position { row: 2, col: 2 };
    const NORTH: Position = Position { row: 1, col: 2 };
    const SOUTH: Position = Position { row: 3, col: 2 };
    const WEST: Position = Position { row: 2, col: 1 };
    const EAST: Position = Position { row: 2, col: 3 };

    fn place(grid: &mut Grid, pos: Position, kind: EntityKind, age: u32) -> EntityId {
        let id = grid.spawn(pos, Species::fresh(kind), 0);
        grid.get_mut(pos).unwrap().age = age;
        id
    }

    fn set_hunger(grid: &mut Grid, pos: Position, hunger: u32, speed: u32) {
        let entity = grid.get_mut(pos).unwrap();
        if let Some(hunter) = hunter_mut(entity) {
            hunter.hunger = hunger;
            hunter.speed = speed;
        }
    }

    fn run(grid: &mut Grid, pos: Position) -> (Action, TickEvents) {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut events = TickEvents::default();
        let mut ctx = TickContext {
            grid,
            rng: &mut rng,
            tick: 1,
            events: &mut events,
        };
        let action = evaluate(&mut ctx, pos);
        (action, events)
    }

    fn is_move(action: Action, distance: u32) -> bool {
        matches!(action, Action::Move { distance: d, .. } if d == distance)
    }

    #[test]
    fn test_empty_cell_is_noop() {
        let mut grid = Grid::new(5, 5).unwrap();
        assert_eq!(run(&mut grid, CENTER).0, Action::NoOp);
    }

    #[test]
    fn test_stone_ages_then_turns_into_reef() {
        let mut grid = Grid::new(5, 5).unwrap();
        let stone = place(&mut grid, CENTER, EntityKind::Stone, 6);

        assert_eq!(run(&mut grid, CENTER).0, Action::NoOp);
        assert_eq!(grid.get(CENTER).unwrap().age, 7);
        assert_eq!(grid.get(CENTER).unwrap().id, stone);

        let (action, events) = run(&mut grid, CENTER);
        assert_eq!(action, Action::NoOp);
        assert_eq!(events.transformations, 1);
        let reef = grid.get(CENTER).unwrap();
        assert_eq!(reef.kind(), EntityKind::Reef);
        assert_eq!(reef.age, 0);
        assert!(reef.is_alive());
        assert_eq!(grid.locate(stone), None);
    }

    #[test]
    fn test_reef_turns_into_stone() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::Reef, 3);

        run(&mut grid, CENTER);
        let stone = grid.get(CENTER).unwrap();
        assert_eq!(stone.kind(), EntityKind::Stone);
        assert_eq!(stone.age, 0);
    }

    #[test]
    fn test_old_prey_dies_regardless_of_neighbors() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::Prey, 7);
        place(&mut grid, NORTH, EntityKind::Predator, 6);
        place(&mut grid, SOUTH, EntityKind::Prey, 4);

        let (action, events) = run(&mut grid, CENTER);
        assert_eq!(action, Action::NoOp);
        assert_eq!(events.died_of_age, 1);
        let prey = grid.get(CENTER).unwrap();
        assert_eq!(prey.age, 8);
        assert!(!prey.is_alive());
        assert_eq!(grid.len(), 3);
    }

    #[test]
    fn test_prey_flees_away_from_first_hunter() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::Prey, 3);
        place(&mut grid, WEST, EntityKind::ApexPredator, 2);
        place(&mut grid, EAST, EntityKind::Predator, 2);
        place(&mut grid, SOUTH, EntityKind::Prey, 3);

        let (action, events) = run(&mut grid, CENTER);
        assert_eq!(
            action,
            Action::Move {
                direction: Direction::East,
                distance: 1
            }
        );
        // Fleeing prey do not breed
        assert_eq!(events.births, 0);
    }

    #[test]
    fn test_prey_flee_directions() {
        for (hunter_at, expected) in [
            (NORTH, Direction::South),
            (SOUTH, Direction::North),
            (WEST, Direction::East),
            (EAST, Direction::West),
        ] {
            let mut grid = Grid::new(5, 5).unwrap();
            place(&mut grid, CENTER, EntityKind::Prey, 0);
            place(&mut grid, hunter_at, EntityKind::Predator, 0);

            let (action, _) = run(&mut grid, CENTER);
            assert_eq!(action, Action::Move { direction: expected, distance: 1 });
        }
    }

    #[test]
    fn test_prey_records_reef_shield() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::Prey, 0);
        place(&mut grid, EAST, EntityKind::Reef, 0);

        let (action, _) = run(&mut grid, CENTER);
        assert!(is_move(action, 1));
        assert!(matches!(
            grid.get(CENTER).unwrap().species,
            Species::Prey(PreyState { shielded: true, .. })
        ));

        grid.remove(EAST);
        run(&mut grid, CENTER);
        assert!(grid.get(CENTER).unwrap().is_vulnerable_prey());
    }

    #[test]
    fn test_prey_offspring_goes_to_first_empty_slot() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::Prey, 2);
        place(&mut grid, NORTH, EntityKind::Prey, 2);
        place(&mut grid, SOUTH, EntityKind::Stone, 0);
        place(&mut grid, EAST, EntityKind::Stone, 0);

        let (action, events) = run(&mut grid, CENTER);
        assert!(is_move(action, 1));
        assert_eq!(events.births, 1);

        let child = grid.get(WEST).unwrap();
        assert_eq!(child.kind(), EntityKind::Prey);
        assert_eq!(child.age, 0);
        assert_eq!(child.acted_tick, 1);
        assert_eq!(grid.len(), 5);
    }

    #[test]
    fn test_immature_prey_do_not_breed() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::Prey, 0);
        place(&mut grid, NORTH, EntityKind::Prey, 5);

        let (_, events) = run(&mut grid, CENTER);
        assert_eq!(events.births, 0);
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_lone_prey_on_single_row_does_not_breed_with_itself() {
        let mut grid = Grid::new(1, 3).unwrap();
        let pos = Position::new(0, 1);
        place(&mut grid, pos, EntityKind::Prey, 4);

        let (_, events) = run(&mut grid, pos);
        assert_eq!(events.births, 0);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_predator_eats_adjacent_prey_instead_of_moving() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::Predator, 3);
        set_hunger(&mut grid, CENTER, 4, 2);
        let prey = place(&mut grid, SOUTH, EntityKind::Prey, 1);

        let (action, events) = run(&mut grid, CENTER);
        assert_eq!(action, Action::NoOp);
        assert_eq!(events.kills, 1);
        assert!(!grid.entity(prey).unwrap().is_alive());

        let predator = grid.get(CENTER).unwrap();
        assert_eq!(predator.hunger(), Some(0));
        assert!(matches!(predator.species, Species::Predator(HunterState { speed: 1, hunger: 0 })));
    }

    #[test]
    fn test_predator_ignores_shielded_and_dead_prey() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::Predator, 3);
        place(&mut grid, NORTH, EntityKind::Prey, 1);
        if let Some(Species::Prey(state)) = grid.get_mut(NORTH).map(|e| &mut e.species) {
            state.shielded = true;
        }
        place(&mut grid, SOUTH, EntityKind::Prey, 1);
        grid.get_mut(SOUTH).unwrap().mark_dead();

        let (action, events) = run(&mut grid, CENTER);
        assert_eq!(events.kills, 0);
        assert!(is_move(action, 1));
        assert_eq!(grid.get(CENTER).unwrap().hunger(), Some(1));
    }

    #[test]
    fn test_predator_speeds_up_when_hungry() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::Predator, 1);
        set_hunger(&mut grid, CENTER, 2, 1);

        let (action, _) = run(&mut grid, CENTER);
        assert!(is_move(action, 2));
        assert!(matches!(
            grid.get(CENTER).unwrap().species,
            Species::Predator(HunterState { speed: 2, hunger: 3 })
        ));
    }

    #[test]
    fn test_predator_starves() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::Predator, 1);
        set_hunger(&mut grid, CENTER, 7, 2);
        place(&mut grid, NORTH, EntityKind::Prey, 1);

        let (action, events) = run(&mut grid, CENTER);
        assert_eq!(action, Action::NoOp);
        assert_eq!(events.starved, 1);
        assert_eq!(events.kills, 0);
        assert!(!grid.get(CENTER).unwrap().is_alive());
    }

    #[test]
    fn test_predator_dies_of_old_age() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::Predator, 15);

        let (_, events) = run(&mut grid, CENTER);
        assert_eq!(events.died_of_age, 1);
        assert!(!grid.get(CENTER).unwrap().is_alive());
    }

    #[test]
    fn test_predators_breed_when_fed_and_mature() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::Predator, 5);
        place(&mut grid, EAST, EntityKind::Predator, 6);
        place(&mut grid, NORTH, EntityKind::Stone, 0);

        let (_, events) = run(&mut grid, CENTER);
        assert_eq!(events.births, 1);
        assert_eq!(grid.get(SOUTH).map(|e| e.kind()), Some(EntityKind::Predator));
    }

    #[test]
    fn test_hungry_predators_do_not_breed() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::Predator, 5);
        place(&mut grid, EAST, EntityKind::Predator, 6);
        set_hunger(&mut grid, EAST, 6, 2);

        let (_, events) = run(&mut grid, CENTER);
        assert_eq!(events.births, 0);
    }

    #[test]
    fn test_calm_apex_leaves_predators_alone() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::ApexPredator, 3);
        set_hunger(&mut grid, CENTER, 4, 2);
        let predator = place(&mut grid, NORTH, EntityKind::Predator, 3);

        let (action, events) = run(&mut grid, CENTER);
        assert_eq!(events.kills, 0);
        assert!(grid.entity(predator).unwrap().is_alive());
        assert!(is_move(action, 2));
    }

    #[test]
    fn test_frenzied_apex_eats_predators() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::ApexPredator, 3);
        set_hunger(&mut grid, CENTER, 5, 2);
        let predator = place(&mut grid, WEST, EntityKind::Predator, 3);
        let prey = place(&mut grid, EAST, EntityKind::Prey, 1);

        let (action, events) = run(&mut grid, CENTER);
        assert_eq!(action, Action::NoOp);
        assert_eq!(events.kills, 1);
        // West comes before east in scan order
        assert!(!grid.entity(predator).unwrap().is_alive());
        assert!(grid.entity(prey).unwrap().is_alive());
        assert_eq!(grid.get(CENTER).unwrap().hunger(), Some(0));
    }

    #[test]
    fn test_apex_speeds_up_twice() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::ApexPredator, 1);
        set_hunger(&mut grid, CENTER, 2, 1);
        let (action, _) = run(&mut grid, CENTER);
        assert!(is_move(action, 2));

        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::ApexPredator, 1);
        set_hunger(&mut grid, CENTER, 5, 2);
        let (action, _) = run(&mut grid, CENTER);
        assert!(is_move(action, 3));
        assert_eq!(grid.get(CENTER).unwrap().hunger(), Some(6));
    }

    #[test]
    fn test_apex_starves_at_seven() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::ApexPredator, 1);
        set_hunger(&mut grid, CENTER, 7, 3);

        let (_, events) = run(&mut grid, CENTER);
        assert_eq!(events.starved, 1);
        assert!(!grid.get(CENTER).unwrap().is_alive());
    }

    #[test]
    fn test_apex_breeding() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::ApexPredator, 10);
        place(&mut grid, SOUTH, EntityKind::ApexPredator, 12);

        let (_, events) = run(&mut grid, CENTER);
        assert_eq!(events.births, 1);
        assert_eq!(grid.get(NORTH).map(|e| e.kind()), Some(EntityKind::ApexPredator));
    }

    #[test]
    fn test_prey_flees_from_dead_flagged_hunter() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::Prey, 0);
        place(&mut grid, NORTH, EntityKind::Predator, 3);
        grid.get_mut(NORTH).unwrap().mark_dead();

        let (action, _) = run(&mut grid, CENTER);
        assert_eq!(action, Action::Move { direction: Direction::South, distance: 1 });
    }

    #[test]
    fn test_fleeing_prey_keeps_previous_shield() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::Prey, 0);
        place(&mut grid, NORTH, EntityKind::Predator, 3);
        place(&mut grid, EAST, EntityKind::Reef, 0);

        let (action, _) = run(&mut grid, CENTER);
        assert_eq!(action, Action::Move { direction: Direction::South, distance: 1 });
        assert!(grid.get(CENTER).unwrap().is_vulnerable_prey());
    }

    #[test]
    fn test_dead_flagged_mate_still_breeds() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::Prey, 2);
        place(&mut grid, NORTH, EntityKind::Prey, 3);
        grid.get_mut(NORTH).unwrap().mark_dead();

        let (_, events) = run(&mut grid, CENTER);
        assert_eq!(events.births, 1);
        assert_eq!(grid.get(SOUTH).map(|e| e.kind()), Some(EntityKind::Prey));
    }

    #[test]
    fn test_dead_entity_death_counted_once() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::Prey, 8);
        grid.get_mut(CENTER).unwrap().mark_dead();

        let (action, events) = run(&mut grid, CENTER);
        assert_eq!(action, Action::NoOp);
        assert_eq!(events.died_of_age, 0);
        assert_eq!(grid.get(CENTER).unwrap().age, 9);
    }

    #[test]
    fn test_immature_prey_first_in_scan_blocks_breeding() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::Prey, 2);
        place(&mut grid, NORTH, EntityKind::Prey, 0);
        place(&mut grid, SOUTH, EntityKind::Prey, 4);

        let (_, events) = run(&mut grid, CENTER);
        assert_eq!(events.births, 0);
        assert_eq!(grid.len(), 3);
    }

    #[test]
    fn test_immature_predator_first_in_scan_blocks_breeding() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::Predator, 5);
        place(&mut grid, WEST, EntityKind::Predator, 1);
        place(&mut grid, EAST, EntityKind::Predator, 8);

        let (_, events) = run(&mut grid, CENTER);
        assert_eq!(events.births, 0);
        assert_eq!(grid.len(), 3);
    }

    #[test]
    fn test_hungry_apex_first_in_scan_blocks_breeding() {
        let mut grid = Grid::new(5, 5).unwrap();
        place(&mut grid, CENTER, EntityKind::ApexPredator, 10);
        place(&mut grid, NORTH, EntityKind::ApexPredator, 12);
        set_hunger(&mut grid, NORTH, 4, 2);
        place(&mut grid, EAST, EntityKind::ApexPredator, 12);

        let (_, events) = run(&mut grid, CENTER);
        assert_eq!(events.births, 0);
        assert_eq!(grid.len(), 3);
    }
}
