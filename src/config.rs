//! Simulation constants, grouped so a deployment can tune them in one place.

/// How many occupied transmitting cells an energy particle may cross in one
/// tick before it counts as absorbed.
pub const MAX_TRANSMIT_RUN: i32 = 16;

#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Ticks per second driven by the scheduler.
    pub tick_rate: u32,
    /// Temperature of empty space; every particle relaxes toward it.
    pub ambient_temperature: f64,
    /// Hard ceiling applied after every heat update.
    pub max_temperature: f64,
    /// Divisor damping per-tick heat exchange, keeping diffusion stable.
    pub heat_normalization: f64,
    /// Registry key the ignition rule transmutes into.
    pub fire_element: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: 20,
            ambient_temperature: 20.0,
            max_temperature: 10_000.0,
            heat_normalization: 8.0,
            fire_element: "FIRE".to_string(),
        }
    }
}
