//! Granula - server-authoritative falling-sand simulation.
//!
//! Architecture:
//! - domain/     - element registry and particle model
//! - world/      - sparse world store + change collection
//! - behaviors/  - per-display-state movement rules
//! - systems/    - the three tick phases (movement, heat, reactions)
//! - simulation/ - orchestration and draw/erase commands
//! - protocol    - observer sync messages
//! - server      - WebSocket boundary and tick scheduler

pub mod behaviors;
pub mod config;
pub mod domain;
pub mod error;
pub mod protocol;
pub mod server;
pub mod simulation;
pub mod systems;
pub mod world;

pub use config::SimConfig;
pub use domain::elements::{
    DisplayState, ElementDef, ElementRegistry, EnergyResponse, ReactionBehavior,
};
pub use domain::particle::{Particle, LIFE_UNBOUNDED};
pub use error::EngineError;
pub use protocol::{CellState, ClientMessage, DrawCommand, ServerMessage, ERASE_ELEMENT};
pub use simulation::Simulation;
pub use world::{CellChange, ChangeSet, WorldStore};
