//! 2D toroidal grid holding at most one entity per cell.

use crate::entity::{kind_for_roll, Entity, EntityId, Species};
use crate::neighborhood::Neighborhood;
use ocean_core::{Direction, Error, Position, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// A 2D toroidal grid
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Entity>>,
    locations: HashMap<EntityId, Position>,
    next_id: u64,
}

impl Grid {
    /// Empty grid. Both extents must be at least one.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidConfig(format!(
                "grid must have positive dimensions, got {} x {}",
                rows, cols
            )));
        }

        Ok(Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            locations: HashMap::new(),
            next_id: 0,
        })
    }

    /// Randomly populated grid, deterministic for a given seed
    pub fn create(rows: usize, cols: usize, seed: u64) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::populate(rows, cols, &mut rng, 0)
    }

    /// Fill every cell independently from the spawn table
    pub fn populate<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        rng: &mut R,
        tick: u64,
    ) -> Result<Self> {
        let mut grid = Self::new(rows, cols)?;

        for index in 0..grid.cells.len() {
            let roll = rng.gen_range(0..100);
            if let Some(kind) = kind_for_roll(roll) {
                let pos = Position::from_index(index, cols);
                grid.spawn(pos, Species::fresh(kind), tick);
            }
        }

        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of live or dead-flagged entities on the grid
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Wrap an arbitrary position into the grid
    pub fn wrap(&self, pos: Position) -> Position {
        pos.offset(0, 0, self.rows, self.cols)
    }

    pub fn get(&self, pos: Position) -> Option<&Entity> {
        let index = self.pos_to_index(pos);
        self.cells[index].as_ref()
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Entity> {
        let index = self.pos_to_index(pos);
        self.cells[index].as_mut()
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// Current position of an entity, if it is still on the grid
    pub fn locate(&self, id: EntityId) -> Option<Position> {
        self.locations.get(&id).copied()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.locate(id).and_then(|pos| self.get(pos))
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let pos = self.locate(id)?;
        self.get_mut(pos)
    }

    /// Cell `distance` steps away in `direction`, wrapping at the edges
    pub fn destination(&self, from: Position, direction: Direction, distance: u32) -> Position {
        from.step(direction, distance, self.rows, self.cols)
    }

    /// Snapshot of the four orthogonal neighbors as they are right now
    pub fn neighbors_of(&self, pos: Position) -> Neighborhood {
        let center = self.wrap(pos);
        let positions = Direction::SCAN_ORDER.map(|d| self.destination(center, d, 1));
        let slots = positions.map(|p| self.get(p).copied());
        Neighborhood::new(center, positions, slots)
    }

    /// Relocate the occupant of `from`.
    ///
    /// Only the destination cell is checked, cells passed over on a
    /// multi-cell move are not. Returns false, leaving the grid unchanged,
    /// when `from` is empty or the destination is occupied.
    pub fn move_entity(&mut self, from: Position, direction: Direction, distance: u32) -> bool {
        let from = self.wrap(from);
        let to = self.destination(from, direction, distance);

        if self.is_occupied(to) {
            return false;
        }

        let from_index = self.pos_to_index(from);
        let Some(entity) = self.cells[from_index].take() else {
            return false;
        };

        trace!(entity = %entity.id, from = %from, to = %to, "Entity moved");
        self.locations.insert(entity.id, to);
        let index = self.pos_to_index(to);
        self.cells[index] = Some(entity);
        true
    }

    /// Put `entity` at `pos`, returning whatever was there before
    pub fn place(&mut self, pos: Position, entity: Entity) -> Option<Entity> {
        let pos = self.wrap(pos);
        let previous = self.remove(pos);

        // An entity occupies exactly one cell
        if let Some(old) = self.locations.insert(entity.id, pos) {
            let index = self.pos_to_index(old);
            self.cells[index] = None;
        }

        let index = self.pos_to_index(pos);
        self.cells[index] = Some(entity);
        previous
    }

    /// Create a fresh entity at `pos`
    pub fn spawn(&mut self, pos: Position, species: Species, tick: u64) -> EntityId {
        let id = self.allocate_id();
        self.place(pos, Entity::new(id, species, tick));
        id
    }

    pub fn remove(&mut self, pos: Position) -> Option<Entity> {
        let index = self.pos_to_index(pos);
        let entity = self.cells[index].take()?;
        self.locations.remove(&entity.id);
        Some(entity)
    }

    /// Remove every entity flagged dead, returning how many were removed
    pub fn sweep_dead(&mut self) -> usize {
        let mut removed = 0;
        for index in 0..self.cells.len() {
            let dead = matches!(&self.cells[index], Some(e) if !e.is_alive());
            if dead {
                if let Some(entity) = self.cells[index].take() {
                    self.locations.remove(&entity.id);
                    removed += 1;
                }
            }
        }
        removed
    }

    /// One line per row, one symbol per cell
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in self.cells.chunks(self.cols) {
            out.extend(row.iter().map(|cell| cell.map_or('.', |e| e.symbol())));
            out.push('\n');
        }
        out
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        self.wrap(pos).to_index(self.cols)
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| Position::from_index(i, self.cols))
    }

    /// Occupied cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Entity)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.as_ref().map(|e| (Position::from_index(i, self.cols), e)))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
