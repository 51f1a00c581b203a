//! Draw/erase brush commands.
//!
//! A draw is an authoritative write: it overwrites any occupant and ignores
//! density/collision rules. Erase removes whatever is there; erasing an
//! already-empty cell produces no change entry.

use tracing::warn;

use crate::domain::particle::Particle;
use crate::protocol::{DrawCommand, ERASE_ELEMENT};
use crate::world::ChangeSet;

use super::Simulation;

pub(super) fn apply_draw(sim: &mut Simulation, cmd: &DrawCommand) -> ChangeSet {
    let mut changes = ChangeSet::new();

    if cmd.radius < 0 {
        warn!(radius = cmd.radius, "draw rejected: negative radius");
        return changes;
    }

    let erase = cmd.element == ERASE_ELEMENT;
    let def = if erase {
        None
    } else {
        match sim.registry.get(&cmd.element) {
            Ok(def) => Some(def),
            Err(err) => {
                // Every cell of the stroke shares this key, so rejecting the
                // stroke is the per-cell no-op the contract asks for.
                warn!(%err, "draw rejected");
                return changes;
            }
        }
    };

    let r = cmd.radius;
    let r2 = r * r;
    for j in -r..=r {
        for i in -r..=r {
            if i * i + j * j > r2 {
                continue;
            }
            let (x, y) = (cmd.x + i, cmd.y + j);
            match def {
                Some(def) => {
                    let particle = Particle::new(
                        &cmd.element,
                        def,
                        sim.config.ambient_temperature,
                        sim.config.max_temperature,
                    );
                    sim.world.set(x, y, Some(particle), &mut changes);
                }
                None => sim.world.set(x, y, None, &mut changes),
            }
        }
    }

    changes
}
