//! Gas movement - the upward mirror of liquids, with a drifting tail.

use super::{Behavior, MoveContext};
use crate::domain::elements::DisplayState;

/// States a gas may bubble through when strictly denser than them (e.g.
/// smoke displacing a lighter gas pocket).
const DISPLACEABLE: [DisplayState; 2] = [DisplayState::Gas, DisplayState::Liquid];

/// The eight neighbor offsets, for the random drift fallback.
const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub struct GasBehavior;

impl Behavior for GasBehavior {
    fn update(&self, ctx: &mut MoveContext) {
        let (x, y) = (ctx.x, ctx.y);

        let Some(my_density) = ctx
            .world
            .get(x, y)
            .and_then(|p| ctx.registry.lookup(&p.element))
            .map(|def| def.density)
        else {
            return;
        };

        // Rise, or displace a strictly lighter fluid above.
        if ctx.world.is_empty_at(x, y - 1) {
            ctx.world.swap(x, y, x, y - 1, ctx.changes);
            return;
        }
        if ctx.can_displace(x, y - 1, my_density, &DISPLACEABLE) {
            ctx.world.swap(x, y, x, y - 1, ctx.changes);
            return;
        }

        // Trapped: drift into a uniformly random neighbor if it is empty.
        let (dx, dy) = NEIGHBORS[ctx.rng.usize(..NEIGHBORS.len())];
        if ctx.world.is_empty_at(x + dx, y + dy) {
            ctx.world.swap(x, y, x + dx, y + dy, ctx.changes);
        }
    }
}
