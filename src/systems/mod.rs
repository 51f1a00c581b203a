//! Per-tick physics phases. Order is fixed: movement settles positions,
//! then heat diffuses over the settled grid, then reactions fire.

pub mod movement;
pub mod reactions;
pub mod temperature;

/// The eight neighbor offsets shared by heat transfer and reactions.
pub(crate) const NEIGHBORS_8: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];
