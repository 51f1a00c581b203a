//! The per-cell particle record.

use serde::{Deserialize, Serialize};

use super::elements::ElementDef;

/// Sentinel meaning "never expires".
pub const LIFE_UNBOUNDED: i32 = -1;

/// Mutable state of one occupied cell. Wire-compatible with the observer
/// replica: the element key serializes as `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    #[serde(rename = "type")]
    pub element: String,
    pub vx: f64,
    pub vy: f64,
    pub temperature: f64,
    #[serde(default = "unbounded")]
    pub life: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aux: Option<u32>,
}

fn unbounded() -> i32 {
    LIFE_UNBOUNDED
}

impl Particle {
    /// Construct a fresh particle from its definition. `ambient` seeds the
    /// temperature when the element carries no initial one; either way the
    /// result is clamped to `[0, max_temperature]`, so a bundle declaring an
    /// out-of-range initial temperature cannot smuggle it into the store.
    pub fn new(key: &str, def: &ElementDef, ambient: f64, max_temperature: f64) -> Self {
        let (vx, vy) = def.initial_velocity.unwrap_or((0.0, 0.0));
        Self {
            element: key.to_string(),
            vx,
            vy,
            temperature: def
                .initial_temperature
                .unwrap_or(ambient)
                .clamp(0.0, max_temperature),
            life: def.initial_life.unwrap_or(LIFE_UNBOUNDED),
            aux: def.initial_aux,
        }
    }
}
