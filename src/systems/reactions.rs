//! Reaction / state-change phase.
//!
//! Per particle, strictly in this priority order: life countdown, ignition,
//! boiling, then the element's own behavior block. The first rule that
//! replaces or removes the particle ends its processing for the tick.

use tracing::warn;

use crate::config::SimConfig;
use crate::domain::elements::{ElementRegistry, ReactionBehavior};
use crate::domain::particle::Particle;
use crate::systems::NEIGHBORS_8;
use crate::world::{ChangeSet, WorldStore};

pub fn process_reactions(
    world: &mut WorldStore,
    registry: &ElementRegistry,
    config: &SimConfig,
    rng: &mut fastrand::Rng,
    changes: &mut ChangeSet,
) {
    for (x, y) in world.snapshot_coordinates() {
        let Some(current) = world.get(x, y) else {
            continue;
        };
        let mut particle = current.clone();

        let Some(def) = registry.lookup(&particle.element) else {
            warn!(x, y, element = %particle.element, "reactions: unknown element, skipping cell");
            continue;
        };

        // 1. Life countdown.
        if particle.life > 0 {
            particle.life -= 1;
            if particle.life == 0 {
                world.set(x, y, None, changes);
                continue;
            }
            world.set(x, y, Some(particle.clone()), changes);
        }

        // 2. Ignition.
        if let Some(threshold) = def.flammability_threshold {
            if particle.temperature >= threshold {
                match registry.get(&config.fire_element) {
                    Ok(fire_def) => {
                        let fire = Particle::new(
                            &config.fire_element,
                            fire_def,
                            config.ambient_temperature,
                            config.max_temperature,
                        );
                        world.set(x, y, Some(fire), changes);
                        continue;
                    }
                    Err(err) => warn!(x, y, %err, "ignition skipped"),
                }
            }
        }

        // 3. Boiling.
        if let (Some(point), Some(product)) = (def.boiling_point, &def.boil_product) {
            if particle.temperature >= point {
                match registry.get(product) {
                    Ok(product_def) => {
                        let boiled = Particle::new(
                            product,
                            product_def,
                            config.ambient_temperature,
                            config.max_temperature,
                        );
                        world.set(x, y, Some(boiled), changes);
                        continue;
                    }
                    Err(err) => warn!(x, y, %err, "boiling skipped"),
                }
            }
        }

        // 4. Element-specific behavior.
        match &def.behavior {
            Some(ReactionBehavior::Flame {
                emit_temperature,
                smoke_element,
                smoke_chance,
                extinguish_chance,
            }) => {
                let pinned = emit_temperature.clamp(0.0, config.max_temperature);
                if (particle.temperature - pinned).abs() > f64::EPSILON {
                    particle.temperature = pinned;
                    world.set(x, y, Some(particle.clone()), changes);
                }
                if rng.f64() < *smoke_chance && world.is_empty_at(x, y - 1) {
                    if let Ok(smoke_def) = registry.get(smoke_element) {
                        let smoke = Particle::new(
                            smoke_element,
                            smoke_def,
                            config.ambient_temperature,
                            config.max_temperature,
                        );
                        world.set(x, y - 1, Some(smoke), changes);
                    }
                }
                if rng.f64() < *extinguish_chance {
                    world.set(x, y, None, changes);
                }
            }

            Some(ReactionBehavior::Growth { requires, chance }) => {
                if neighbor_is(world, x, y, requires) && rng.f64() < *chance {
                    let empty: Vec<(i32, i32)> = NEIGHBORS_8
                        .iter()
                        .map(|(dx, dy)| (x + dx, y + dy))
                        .filter(|&(nx, ny)| world.is_empty_at(nx, ny))
                        .collect();
                    if !empty.is_empty() {
                        let (gx, gy) = empty[rng.usize(..empty.len())];
                        let sprout = Particle::new(
                            &particle.element,
                            def,
                            config.ambient_temperature,
                            config.max_temperature,
                        );
                        world.set(gx, gy, Some(sprout), changes);
                    }
                }
            }

            Some(ReactionBehavior::Quench {
                coolant,
                solid_product,
                gas_byproduct,
            }) => {
                if neighbor_is(world, x, y, coolant) {
                    if let Ok(solid_def) = registry.get(solid_product) {
                        let solid = Particle::new(
                            solid_product,
                            solid_def,
                            config.ambient_temperature,
                            config.max_temperature,
                        );
                        world.set(x, y, Some(solid), changes);
                    }
                    if world.is_empty_at(x, y - 1) {
                        if let Ok(gas_def) = registry.get(gas_byproduct) {
                            let gas = Particle::new(
                                gas_byproduct,
                                gas_def,
                                config.ambient_temperature,
                                config.max_temperature,
                            );
                            world.set(x, y - 1, Some(gas), changes);
                        }
                    }
                }
            }

            Some(ReactionBehavior::Corrode { resistant }) => {
                for (dx, dy) in NEIGHBORS_8 {
                    let (nx, ny) = (x + dx, y + dy);
                    let eaten = match world.get(nx, ny) {
                        Some(neighbor) => !resistant.iter().any(|k| k == &neighbor.element),
                        None => false,
                    };
                    if eaten {
                        world.set(nx, ny, None, changes);
                    }
                }
            }

            None => {}
        }
    }
}

fn neighbor_is(world: &WorldStore, x: i32, y: i32, key: &str) -> bool {
    NEIGHBORS_8
        .iter()
        .any(|(dx, dy)| world.get(x + dx, y + dy).is_some_and(|p| p.element == key))
}
