//! Movement behaviors - one per display state.
//!
//! Each behavior moves exactly one particle for one tick. Dispatch is on
//! `DisplayState` from the registry, never on element identity, so a new
//! element picks up its movement rule from data alone.

mod energy;
mod gas;
mod liquid;
mod powder;

pub use energy::EnergyBehavior;
pub use gas::GasBehavior;
pub use liquid::LiquidBehavior;
pub use powder::PowderBehavior;

use crate::domain::elements::{DisplayState, ElementRegistry};
use crate::world::{ChangeSet, WorldStore};

/// Everything a behavior may touch while updating the particle at (x, y).
pub struct MoveContext<'a> {
    pub world: &'a mut WorldStore,
    pub registry: &'a ElementRegistry,
    pub changes: &'a mut ChangeSet,
    pub rng: &'a mut fastrand::Rng,
    pub x: i32,
    pub y: i32,
}

impl MoveContext<'_> {
    /// Display state and density of the occupant at (x, y), if any.
    /// Unknown elements read as `None` and are treated as unmovable.
    pub fn occupant_props(&self, x: i32, y: i32) -> Option<(DisplayState, f64)> {
        let particle = self.world.get(x, y)?;
        let def = self.registry.lookup(&particle.element)?;
        Some((def.display_state, def.density))
    }

    /// True when (x, y) is empty, or holds a strictly less dense occupant of
    /// a density-comparable state. The failing case leaves both in place.
    pub fn can_displace(&self, x: i32, y: i32, my_density: f64, through: &[DisplayState]) -> bool {
        match self.occupant_props(x, y) {
            None => self.world.is_empty_at(x, y),
            Some((state, density)) => through.contains(&state) && my_density > density,
        }
    }

    /// Random lateral direction, 50/50.
    pub fn random_dir(&mut self) -> i32 {
        if self.rng.bool() {
            1
        } else {
            -1
        }
    }
}

/// Movement rule for one display state.
pub trait Behavior {
    fn update(&self, ctx: &mut MoveContext);
}

/// Dispatch table, one behavior per movable display state.
pub struct BehaviorRegistry {
    powder: PowderBehavior,
    liquid: LiquidBehavior,
    gas: GasBehavior,
    energy: EnergyBehavior,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self {
            powder: PowderBehavior,
            liquid: LiquidBehavior,
            gas: GasBehavior,
            energy: EnergyBehavior,
        }
    }

    pub fn update(&self, state: DisplayState, ctx: &mut MoveContext) {
        match state {
            DisplayState::Powder => self.powder.update(ctx),
            DisplayState::Liquid => self.liquid.update(ctx),
            DisplayState::Gas => self.gas.update(ctx),
            DisplayState::Energy => self.energy.update(ctx),
            // Solids and immovables have no motion rule.
            DisplayState::Solid | DisplayState::Immovable => {}
        }
    }
}

impl Default for BehaviorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
