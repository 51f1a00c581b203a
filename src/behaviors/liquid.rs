//! Liquid movement - falls, sinks through lighter fluids, spreads sideways.

use super::{Behavior, MoveContext};
use crate::domain::elements::DisplayState;

/// States a liquid may sink through when strictly denser.
const DISPLACEABLE: [DisplayState; 2] = [DisplayState::Liquid, DisplayState::Gas];

pub struct LiquidBehavior;

impl Behavior for LiquidBehavior {
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

        // Fall, or sink through a strictly lighter fluid below.
        if ctx.world.is_empty_at(x, y + 1) {
            ctx.world.swap(x, y, x, y + 1, ctx.changes);
            return;
        }
        if ctx.can_displace(x, y + 1, my_density, &DISPLACEABLE) {
            ctx.world.swap(x, y, x, y + 1, ctx.changes);
            return;
        }

        // Settled: spread into an empty lateral cell, side chosen 50/50.
        let dir = ctx.random_dir();
        if ctx.world.is_empty_at(x + dir, y) {
            ctx.world.swap(x, y, x + dir, y, ctx.changes);
        }
    }
}
