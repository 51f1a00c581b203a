//! Heat transfer phase.
//!
//! Two passes: every delta is computed from a snapshot of the pre-phase
//! temperatures, then the whole batch is applied at once. Applying in place
//! during the pass would bias the result by iteration order.

use std::collections::HashMap;

use tracing::warn;

use crate::config::SimConfig;
use crate::domain::elements::ElementRegistry;
use crate::systems::NEIGHBORS_8;
use crate::world::{ChangeSet, WorldStore};

/// Deltas smaller than this are noise; skipping them keeps equilibrium
/// worlds from broadcasting every tick.
const NEGLIGIBLE_DELTA: f64 = 1e-3;

struct ThermalCell {
    temperature: f64,
    conductivity: f64,
    heat_conductivity: f64,
}

pub fn process_temperature(
    world: &mut WorldStore,
    registry: &ElementRegistry,
    config: &SimConfig,
    changes: &mut ChangeSet,
) {
    let coords = world.snapshot_coordinates();

    // Pass 1a: snapshot pre-phase temperatures and rates.
    let mut snapshot: HashMap<(i32, i32), ThermalCell> = HashMap::with_capacity(coords.len());
    for &(x, y) in &coords {
        let Some(particle) = world.get(x, y) else {
            continue;
        };
        let Some(def) = registry.lookup(&particle.element) else {
            warn!(x, y, element = %particle.element, "heat: unknown element, skipping cell");
            continue;
        };
        snapshot.insert(
            (x, y),
            ThermalCell {
                temperature: particle.temperature,
                conductivity: def.conductivity,
                heat_conductivity: def.heat_conductivity,
            },
        );
    }

    // Pass 1b: neighbor exchange plus ambient pull, all from the snapshot.
    let mut deltas: Vec<((i32, i32), f64)> = Vec::new();
    for &(x, y) in &coords {
        let Some(cell) = snapshot.get(&(x, y)) else {
            continue;
        };

        let mut delta = 0.0;
        for (dx, dy) in NEIGHBORS_8 {
            if let Some(neighbor) = snapshot.get(&(x + dx, y + dy)) {
                let rate = (cell.heat_conductivity + neighbor.heat_conductivity) / 2.0;
                delta += (neighbor.temperature - cell.temperature) * rate
                    / config.heat_normalization;
            }
        }
        delta += (config.ambient_temperature - cell.temperature) * cell.conductivity
            / config.heat_normalization;

        if delta.abs() >= NEGLIGIBLE_DELTA {
            deltas.push(((x, y), delta));
        }
    }

    // Pass 2: apply the batch, clamped; drift never reaches the store.
    for ((x, y), delta) in deltas {
        let Some(particle) = world.get(x, y) else {
            continue;
        };
        let next = particle.temperature + delta;
        if !next.is_finite() {
            warn!(x, y, delta, "heat: non-finite temperature discarded");
            continue;
        }
        let next = next.clamp(0.0, config.max_temperature);
        if (next - particle.temperature).abs() >= NEGLIGIBLE_DELTA {
            let mut updated = particle.clone();
            updated.temperature = next;
            world.set(x, y, Some(updated), changes);
        }
    }
}
