//! Simulation - orchestration only.
//!
//! Owns the world, the registry handle, and the RNG, and runs the three
//! phases in their fixed order. Commands and phases all funnel their writes
//! through a per-call `ChangeSet`, which is the unit handed to broadcast.

mod commands;

use std::sync::Arc;

use crate::behaviors::BehaviorRegistry;
use crate::config::SimConfig;
use crate::domain::elements::ElementRegistry;
use crate::protocol::{CellState, DrawCommand};
use crate::systems::{movement, reactions, temperature};
use crate::world::{ChangeSet, WorldStore};

pub struct Simulation {
    registry: Arc<ElementRegistry>,
    config: SimConfig,
    world: WorldStore,
    behaviors: BehaviorRegistry,
    rng: fastrand::Rng,
    tick: u64,
}

impl Simulation {
    pub fn new(registry: Arc<ElementRegistry>, config: SimConfig) -> Self {
        Self::from_rng(registry, config, fastrand::Rng::new())
    }

    /// Deterministic variant for tests.
    pub fn with_seed(registry: Arc<ElementRegistry>, config: SimConfig, seed: u64) -> Self {
        Self::from_rng(registry, config, fastrand::Rng::with_seed(seed))
    }

    fn from_rng(registry: Arc<ElementRegistry>, config: SimConfig, rng: fastrand::Rng) -> Self {
        Self {
            registry,
            config,
            world: WorldStore::new(),
            behaviors: BehaviorRegistry::new(),
            rng,
            tick: 0,
        }
    }

    /// Advance the world one tick: movement settles positions, heat
    /// diffuses over the settled grid, then reactions fire. Returns the
    /// ordered batch of every write the tick performed.
    pub fn step(&mut self) -> ChangeSet {
        let mut changes = ChangeSet::new();
        movement::process_movement(
            &mut self.world,
            &self.registry,
            &self.behaviors,
            &mut self.rng,
            &mut changes,
        );
        temperature::process_temperature(&mut self.world, &self.registry, &self.config, &mut changes);
        reactions::process_reactions(
            &mut self.world,
            &self.registry,
            &self.config,
            &mut self.rng,
            &mut changes,
        );
        self.tick += 1;
        changes
    }

    /// Apply a draw/erase command immediately (never deferred to the next
    /// tick) and return its batch for broadcast.
    pub fn draw(&mut self, cmd: &DrawCommand) -> ChangeSet {
        commands::apply_draw(self, cmd)
    }

    /// Full-state payload for a joining observer, in snapshot order.
    pub fn full_world(&self) -> Vec<CellState> {
        self.world
            .snapshot_coordinates()
            .into_iter()
            .filter_map(|(x, y)| {
                self.world.get(x, y).map(|particle| CellState {
                    x,
                    y,
                    particle: particle.clone(),
                })
            })
            .collect()
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &WorldStore {
        &self.world
    }

    pub fn particle_count(&self) -> usize {
        self.world.len()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }
}
