//! Powder movement - falls straight down, then tumbles diagonally.

use super::{Behavior, MoveContext};

pub struct PowderBehavior;

impl Behavior for PowderBehavior {
    fn update(&self, ctx: &mut MoveContext) {
        let (x, y) = (ctx.x, ctx.y);

        // Straight fall.
        if ctx.world.is_empty_at(x, y + 1) {
            ctx.world.swap(x, y, x, y + 1, ctx.changes);
            return;
        }

        // Blocked below: tumble into one below-diagonal, side chosen 50/50.
        let dir = ctx.random_dir();
        if ctx.world.is_empty_at(x + dir, y + 1) {
            ctx.world.swap(x, y, x + dir, y + 1, ctx.changes);
        }
    }
}
