//! Tick driver for the ocean.

use crate::behavior::{self, Action, TickContext, TickEvents};
use crate::census::Census;
use crate::entity::EntityId;
use crate::grid::Grid;
use ocean_core::{Position, Result, SimulationConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

pub struct Simulation {
    grid: Grid,
    rng: ChaCha8Rng,
    seed: u64,
    tick: u64,
    census_interval: u64,
    totals: TickEvents,
}

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub events: TickEvents,
    /// Dead entities cleared by the end-of-tick sweep
    pub removed: usize,
    pub census: Census,
}

/// Outcome of a bounded run
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks: u64,
    pub totals: TickEvents,
    pub census: Census,
}

impl Simulation {
    /// Build a randomly populated ocean from configuration.
    ///
    /// One generator, seeded from `config.seed` (or a fresh random seed),
    /// drives both population and every later tick.
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        let (rows, cols) = config.world.dimensions()?;
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = Grid::populate(rows, cols, &mut rng, 0)?;

        info!(seed, rows, cols, population = grid.len(), "Ocean created");

        Ok(Self {
            grid,
            rng,
            seed,
            tick: 0,
            census_interval: config.census_interval,
            totals: TickEvents::default(),
        })
    }

    /// Drive a hand-built grid
    pub fn with_grid(grid: Grid, seed: u64) -> Self {
        Self {
            grid,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            tick: 0,
            census_interval: 0,
            totals: TickEvents::default(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Number of ticks completed so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Events accumulated over every tick so far
    pub fn totals(&self) -> &TickEvents {
        &self.totals
    }

    pub fn census(&self) -> Census {
        Census::of(&self.grid)
    }

    pub fn render(&self) -> String {
        self.grid.render()
    }

    /// Advance the ocean by one tick.
    ///
    /// Cells are visited in row-major order and every action is applied to
    /// the live grid immediately, so later cells see the effects of earlier
    /// ones. An entity acts at most once per tick: newborns and entities
    /// that moved onto a cell not yet visited wait for the next tick.
    /// Entities flagged dead still take their turn and are only removed by
    /// the sweep at the end.
    pub fn step(&mut self) -> TickReport {
        self.tick += 1;
        let tick = self.tick;
        let mut events = TickEvents::default();
        let cols = self.grid.cols();
        let cells = self.grid.rows() * cols;

        for index in 0..cells {
            let pos = Position::from_index(index, cols);
            let Some(entity) = self.grid.get(pos) else {
                continue;
            };
            if entity.acted_tick >= tick {
                continue;
            }
            let id = entity.id;

            let action = {
                let mut ctx = TickContext {
                    grid: &mut self.grid,
                    rng: &mut self.rng,
                    tick,
                    events: &mut events,
                };
                behavior::evaluate(&mut ctx, pos)
            };
            self.apply(id, action, &mut events);
        }

        let removed = self.grid.sweep_dead();
        self.totals.absorb(&events);
        let census = self.census();

        debug!(
            tick,
            births = events.births,
            kills = events.kills,
            deaths = events.deaths(),
            removed,
            transformations = events.transformations,
            "Tick complete"
        );

        if self.census_interval > 0 && tick % self.census_interval == 0 {
            log_census(tick, &census);
        }

        TickReport {
            tick,
            events,
            removed,
            census,
        }
    }

    /// Apply a movement action. A blocked move is dropped silently.
    fn apply(&mut self, id: EntityId, action: Action, events: &mut TickEvents) {
        let Action::Move { direction, distance } = action else {
            return;
        };
        let Some(from) = self.grid.locate(id) else {
            return;
        };

        if self.grid.move_entity(from, direction, distance) {
            events.moves += 1;
        } else {
            events.blocked_moves += 1;
        }
    }

    /// Run a fixed number of ticks
    #[instrument(skip(self), fields(seed = self.seed))]
    pub fn run(&mut self, ticks: u64) -> RunSummary {
        info!("Running ocean for {} ticks", ticks);

        for _ in 0..ticks {
            self.step();
        }

        let summary = self.summary();
        emit_summary(&summary);
        summary
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            seed: self.seed,
            ticks: self.tick,
            totals: self.totals,
            census: self.census(),
        }
    }
}

fn log_census(tick: u64, census: &Census) {
    info!(
        event = "census",
        tick,
        prey = census.prey,
        predators = census.predators,
        apex_predators = census.apex_predators,
        stones = census.stones,
        reefs = census.reefs,
        empty = census.empty,
        "Population census"
    );
}

pub fn emit_summary(summary: &RunSummary) {
    info!(
        event = "run_summary",
        seed = summary.seed,
        ticks = summary.ticks,
        births = summary.totals.births,
        kills = summary.totals.kills,
        starved = summary.totals.starved,
        died_of_age = summary.totals.died_of_age,
        transformations = summary.totals.transformations,
        moves = summary.totals.moves,
        blocked_moves = summary.totals.blocked_moves,
        "Simulation finished"
    );
    log_census(summary.ticks, &summary.census);
}
