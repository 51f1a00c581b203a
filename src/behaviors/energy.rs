//! Energy movement - ballistic particles (light, sparks).
//!
//! An energy particle advances by its rounded velocity vector each tick,
//! walking the ray cell by cell. What happens at an occupied cell is decided
//! by the target element's `energyResponse`: reflect, transmit, filter, or
//! (when absent) absorb.

use super::{Behavior, MoveContext};
use crate::config::MAX_TRANSMIT_RUN;
use crate::domain::elements::EnergyResponse;

pub struct EnergyBehavior;

/// Rotate the packed RGB channels of a filtered particle: r <- g, g <- b,
/// b <- r, top byte discarded.
fn rotate_aux(aux: u32) -> u32 {
    ((aux << 8) & 0xFF_FF00) | ((aux >> 16) & 0xFF)
}

impl Behavior for EnergyBehavior {
    fn update(&self, ctx: &mut MoveContext) {
        let (x, y) = (ctx.x, ctx.y);

        let Some(mut particle) = ctx.world.get(x, y).cloned() else {
            return;
        };

        let dx = particle.vx.round() as i32;
        let dy = particle.vy.round() as i32;
        if dx == 0 && dy == 0 {
            return;
        }
        let (sx, sy) = (dx.signum(), dy.signum());
        let mut travel = dx.abs().max(dy.abs());

        // Cursor scans ahead along the ray; the particle lands on the last
        // empty cell reached. Transmitting media are crossed without being
        // occupied.
        let (mut cx, mut cy) = (x, y);
        let mut landing = (x, y);
        let mut dirty = false; // velocity or aux changed in flight
        let mut tunneled = 0;

        while travel > 0 {
            cx += sx;
            cy += sy;

            let Some(target) = ctx.world.get(cx, cy) else {
                landing = (cx, cy);
                travel -= 1;
                continue;
            };

            let response = ctx
                .registry
                .lookup(&target.element)
                .and_then(|def| def.energy_response);

            match response {
                Some(EnergyResponse::Reflect) => {
                    particle.vx = -particle.vx;
                    particle.vy = -particle.vy;
                    dirty = true;
                    break;
                }
                Some(EnergyResponse::Transmit) | Some(EnergyResponse::Filter) => {
                    if response == Some(EnergyResponse::Filter) {
                        if let Some(aux) = particle.aux {
                            particle.aux = Some(rotate_aux(aux));
                            dirty = true;
                        }
                    }
                    tunneled += 1;
                    if tunneled > MAX_TRANSMIT_RUN {
                        // A ray lost inside an endless medium is absorbed.
                        ctx.world.set(x, y, None, ctx.changes);
                        return;
                    }
                }
                None => {
                    // Absorbed by anything without an optical response.
                    ctx.world.set(x, y, None, ctx.changes);
                    return;
                }
            }
        }

        if landing != (x, y) {
            ctx.world.set(x, y, None, ctx.changes);
            ctx.world.set(landing.0, landing.1, Some(particle), ctx.changes);
        } else if dirty {
            ctx.world.set(x, y, Some(particle), ctx.changes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::rotate_aux;

    #[test]
    fn rotate_aux_cycles_rgb_channels() {
        assert_eq!(rotate_aux(0x00FF00), 0xFF0000);
        assert_eq!(rotate_aux(0xFF0000), 0x0000FF);
        assert_eq!(rotate_aux(0x0000FF), 0x00FF00);
        assert_eq!(rotate_aux(0xFFFFFF), 0xFFFFFF);
    }
}
