//! Movement phase.
//!
//! Iterates a fixed snapshot of the coordinates occupied at phase start, so
//! each particle is considered exactly once per tick no matter where it ends
//! up. A snapshot cell that was vacated by an earlier move is skipped.

use tracing::warn;

use crate::behaviors::{BehaviorRegistry, MoveContext};
use crate::domain::elements::ElementRegistry;
use crate::world::{ChangeSet, WorldStore};

pub fn process_movement(
    world: &mut WorldStore,
    registry: &ElementRegistry,
    behaviors: &BehaviorRegistry,
    rng: &mut fastrand::Rng,
    changes: &mut ChangeSet,
) {
    for (x, y) in world.snapshot_coordinates() {
        // Vacated earlier this phase.
        let Some(particle) = world.get(x, y) else {
            continue;
        };

        // A fault on one particle never aborts the phase.
        let state = match registry.lookup(&particle.element) {
            Some(def) => def.display_state,
            None => {
                warn!(x, y, element = %particle.element, "movement: unknown element, skipping cell");
                continue;
            }
        };

        let mut ctx = MoveContext {
            world: &mut *world,
            registry,
            changes: &mut *changes,
            rng: &mut *rng,
            x,
            y,
        };
        behaviors.update(state, &mut ctx);
    }
}
