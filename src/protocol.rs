//! Sync protocol - the messages observers consume and commands they send.
//!
//! An observer reconstructs the world by applying `elementsDefinition` and
//! `fullWorld` once on join, then every `worldUpdate` batch forever. Update
//! entries carry the absolute new state of a cell (`null` = removed), so a
//! replayed batch is idempotent.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::elements::ElementDef;
use crate::domain::particle::Particle;
use crate::world::CellChange;

/// Reserved element key that means "remove" in a draw command.
pub const ERASE_ELEMENT: &str = "erase";

/// One occupied cell of a full-world snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellState {
    pub x: i32,
    pub y: i32,
    pub particle: Particle,
}

/// Server-to-observer messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    /// The full registry, sent once per connection, before any state.
    ElementsDefinition(HashMap<String, ElementDef>),
    /// Every occupied coordinate, sent once per connection (and again to
    /// resynchronize an observer that fell behind).
    FullWorld(Vec<CellState>),
    /// Ordered change batch of one tick or one command.
    WorldUpdate(Vec<CellChange>),
}

/// Observer-to-server messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    #[serde(rename = "clientDraw")]
    Draw(DrawCommand),
}

/// Brush stroke: fill the disc `i*i + j*j <= radius*radius` around (x, y)
/// with `element`, or clear it when `element` is [`ERASE_ELEMENT`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    pub element: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn world_update_carries_absolute_cell_states() {
        let particle = Particle {
            element: "SAND".to_string(),
            vx: 0.0,
            vy: 0.0,
            temperature: 20.0,
            life: -1,
            aux: None,
        };
        let msg = ServerMessage::WorldUpdate(vec![
            CellChange {
                x: 2,
                y: 2,
                particle: None,
            },
            CellChange {
                x: 2,
                y: 3,
                particle: Some(particle),
            },
        ]);

        let encoded = serde_json::to_value(&msg).unwrap();
        assert_eq!(encoded["event"], "worldUpdate");
        // A removal is an explicit null, never an omitted field.
        assert!(encoded["data"][0]["particle"].is_null());
        assert_eq!(encoded["data"][1]["particle"]["type"], "SAND");
        // aux is omitted when unset.
        assert!(encoded["data"][1]["particle"].get("aux").is_none());
    }

    #[test]
    fn client_draw_parses_from_the_wire() {
        let wire = json!({
            "event": "clientDraw",
            "data": { "x": 10, "y": -4, "radius": 3, "element": "WATR" }
        });
        let msg: ClientMessage = serde_json::from_value(wire).unwrap();
        let ClientMessage::Draw(cmd) = msg;
        assert_eq!(
            cmd,
            DrawCommand {
                x: 10,
                y: -4,
                radius: 3,
                element: "WATR".to_string(),
            }
        );
    }

    #[test]
    fn unknown_event_is_a_parse_error() {
        let wire = json!({ "event": "clientWipeEverything", "data": {} });
        assert!(serde_json::from_value::<ClientMessage>(wire).is_err());
    }

    #[test]
    fn particle_missing_life_defaults_to_unbounded() {
        let wire = json!({ "type": "WATR", "vx": 0.0, "vy": 0.0, "temperature": 20.0 });
        let particle: Particle = serde_json::from_value(wire).unwrap();
        assert_eq!(particle.life, crate::domain::particle::LIFE_UNBOUNDED);
    }
}
