//! World Store - the sparse source of truth for "what occupies where".
//!
//! Unbounded signed coordinates, at most one particle per cell. Every
//! mutation goes through a `ChangeSet` so observers see the same write the
//! store performed, same tick. Single-writer discipline: the simulation's
//! one logical thread of control owns all mutation.

mod changes;

pub use changes::{CellChange, ChangeSet};

use std::collections::HashMap;

use crate::domain::particle::Particle;

#[derive(Debug, Default)]
pub struct WorldStore {
    cells: HashMap<(i32, i32), Particle>,
}

impl WorldStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Particle> {
        self.cells.get(&(x, y))
    }

    pub fn is_empty_at(&self, x: i32, y: i32) -> bool {
        !self.cells.contains_key(&(x, y))
    }

    /// Write a cell's new state. `None` removes any occupant. The write is
    /// recorded even when it overwrites, matching the broadcast contract;
    /// removing an already-empty cell records nothing.
    pub fn set(&mut self, x: i32, y: i32, particle: Option<Particle>, changes: &mut ChangeSet) {
        match particle {
            Some(p) => {
                changes.record(x, y, Some(p.clone()));
                self.cells.insert((x, y), p);
            }
            None => {
                if self.cells.remove(&(x, y)).is_some() {
                    changes.record(x, y, None);
                }
            }
        }
    }

    /// Exchange two cells' occupants (either may be empty) as one atomic
    /// step relative to other store operations.
    pub fn swap(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, changes: &mut ChangeSet) {
        if (x1, y1) == (x2, y2) {
            return;
        }
        let a = self.cells.remove(&(x1, y1));
        let b = self.cells.remove(&(x2, y2));
        if a.is_none() && b.is_none() {
            return;
        }
        changes.record(x1, y1, b.clone());
        changes.record(x2, y2, a.clone());
        if let Some(p) = b {
            self.cells.insert((x1, y1), p);
        }
        if let Some(p) = a {
            self.cells.insert((x2, y2), p);
        }
    }

    /// Ordered sequence of currently occupied coordinates: bottom row first
    /// (descending y), left to right within a row. Bottom-up means a stack
    /// of falling particles settles one full cell per tick instead of only
    /// its lowest member. Every phase pass and every full-sync payload uses
    /// this same ordering.
    pub fn snapshot_coordinates(&self) -> Vec<(i32, i32)> {
        let mut coords: Vec<(i32, i32)> = self.cells.keys().copied().collect();
        coords.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        coords
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(i32, i32), &Particle)> {
        self.cells.iter()
    }
}
