//! Change collection - the ordered mutation log for one tick or one command.

use serde::{Deserialize, Serialize};

use crate::domain::particle::Particle;

/// One World Store write: the new absolute state of a cell. `None` means the
/// cell became empty (serialized as `null` for observers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellChange {
    pub x: i32,
    pub y: i32,
    pub particle: Option<Particle>,
}

/// Accumulates every write in the exact order it happened. Policy: every
/// intermediate write is kept, not just the final value per coordinate, so a
/// step-by-step replay and a final-state-only observer stay consistent.
/// Coalescing per coordinate would shrink payloads and is a legal variant,
/// but is deliberately not what this collector does.
#[derive(Debug, Default)]
pub struct ChangeSet {
    entries: Vec<CellChange>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, x: i32, y: i32, particle: Option<Particle>) {
        self.entries.push(CellChange { x, y, particle });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[CellChange] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<CellChange> {
        self.entries
    }
}
