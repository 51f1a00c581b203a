//! Element registry - data-driven element definitions.
//!
//! All element properties live in a JSON bundle (`elements.json` by
//! default). Movement and reaction phases dispatch on `DisplayState` and the
//! optional behavior blocks, never on element identity, so adding an element
//! is a bundle edit and nothing else.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The default bundle, compiled into the binary.
const BUILTIN_BUNDLE: &str = include_str!("../../elements.json");

/// Broad physical class an element belongs to. Movement dispatches on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayState {
    Solid,
    Powder,
    Liquid,
    Gas,
    Energy,
    Immovable,
}

/// How an element treats an incoming energy particle. Absent means absorb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyResponse {
    Reflect,
    Transmit,
    Filter,
}

/// Per-element reaction behavior, evaluated in the reaction phase after the
/// generic life/ignition/boiling rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReactionBehavior {
    /// Pins its own temperature, sheds smoke upward, may burn out early.
    #[serde(rename_all = "camelCase")]
    Flame {
        emit_temperature: f64,
        smoke_element: String,
        smoke_chance: f64,
        extinguish_chance: f64,
    },
    /// Copies itself into a random empty neighbor when `requires` is adjacent.
    #[serde(rename_all = "camelCase")]
    Growth { requires: String, chance: f64 },
    /// Solidifies next to a coolant, venting a gas byproduct above.
    #[serde(rename_all = "camelCase")]
    Quench {
        coolant: String,
        solid_product: String,
        gas_byproduct: String,
    },
    /// Dissolves every neighbor not on the resistance list.
    #[serde(rename_all = "camelCase")]
    Corrode { resistant: Vec<String> },
}

/// Static properties of one element. Immutable after registry load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDef {
    pub name: String,
    /// Client picker grouping; carried through `ElementsDefinition` untouched.
    pub menu: String,
    /// Render hint for observers, not inspected by the engine.
    pub color: String,
    pub display_state: DisplayState,
    /// Infinite for immovable solids; JSON `null` on the wire.
    #[serde(with = "infinite_density", default = "default_density")]
    pub density: f64,
    /// Ambient cooling rate, ~[0, 1].
    #[serde(default)]
    pub conductivity: f64,
    /// Neighbor heat exchange rate, ~[0, 1].
    #[serde(default)]
    pub heat_conductivity: f64,
    /// Ignites into the configured fire element at or above this temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flammability_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boiling_point: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boil_product: Option<String>,
    /// Tick countdown for self-expiring elements; absent means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_life: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_temperature: Option<f64>,
    /// Starting velocity for ballistic energy particles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_velocity: Option<(f64, f64)>,
    /// Packed 24-bit RGB tag for light-like particles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_aux: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_response: Option<EnergyResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior: Option<ReactionBehavior>,
}

fn default_density() -> f64 {
    0.0
}

/// `density: null` on the wire means infinite (never displaced). serde_json
/// cannot round-trip non-finite floats, so map them through an Option.
mod infinite_density {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
        if v.is_finite() {
            s.serialize_some(v)
        } else {
            s.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        let v: Option<f64> = Option::deserialize(d)?;
        Ok(v.unwrap_or(f64::INFINITY))
    }
}

/// Immutable table of element definitions, loaded once at startup.
#[derive(Debug, Clone)]
pub struct ElementRegistry {
    elements: HashMap<String, ElementDef>,
}

impl ElementRegistry {
    /// Parse a bundle and check cross-references so a particle can never
    /// point at a key the registry cannot resolve.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let elements: HashMap<String, ElementDef> =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidBundle(e.to_string()))?;

        let registry = Self { elements };
        registry.validate()?;
        Ok(registry)
    }

    /// The bundle compiled into the binary.
    pub fn builtin() -> Result<Self, EngineError> {
        Self::from_json(BUILTIN_BUNDLE)
    }

    fn validate(&self) -> Result<(), EngineError> {
        let check = |key: &str| -> Result<(), EngineError> {
            if self.elements.contains_key(key) {
                Ok(())
            } else {
                Err(EngineError::InvalidBundle(format!(
                    "bundle references undefined element: {key}"
                )))
            }
        };

        for def in self.elements.values() {
            if let Some(product) = &def.boil_product {
                check(product)?;
            }
            match &def.behavior {
                Some(ReactionBehavior::Flame { smoke_element, .. }) => check(smoke_element)?,
                Some(ReactionBehavior::Growth { requires, .. }) => check(requires)?,
                Some(ReactionBehavior::Quench {
                    coolant,
                    solid_product,
                    gas_byproduct,
                }) => {
                    check(coolant)?;
                    check(solid_product)?;
                    check(gas_byproduct)?;
                }
                Some(ReactionBehavior::Corrode { resistant }) => {
                    for key in resistant {
                        check(key)?;
                    }
                }
                None => {}
            }
        }
        Ok(())
    }

    /// Definition lookup, failing on absent keys.
    pub fn get(&self, key: &str) -> Result<&ElementDef, EngineError> {
        self.elements
            .get(key)
            .ok_or_else(|| EngineError::UnknownElement(key.to_string()))
    }

    /// Infallible lookup for hot paths that treat unknowns as inert.
    pub fn lookup(&self, key: &str) -> Option<&ElementDef> {
        self.elements.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.elements.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The full definition table, for the `ElementsDefinition` message.
    pub fn definitions(&self) -> &HashMap<String, ElementDef> {
        &self.elements
    }
}
