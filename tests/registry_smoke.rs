//! Element registry loading and validation against the builtin bundle.

use granula::{DisplayState, ElementRegistry, EngineError};

#[test]
fn builtin_bundle_loads_and_validates() {
    let registry = ElementRegistry::builtin().expect("builtin bundle is valid");
    assert!(!registry.is_empty());
    for key in ["WALL", "SAND", "WATR", "OIL", "FIRE", "LAVA", "ACID"] {
        assert!(registry.contains(key), "builtin bundle defines {key}");
    }
}

#[test]
fn lookup_resolves_known_elements() {
    let registry = ElementRegistry::builtin().unwrap();
    let sand = registry.get("SAND").expect("SAND is defined");
    assert_eq!(sand.display_state, DisplayState::Powder);
    assert_eq!(sand.density, 1.5);
}

#[test]
fn unknown_key_is_a_typed_error() {
    let registry = ElementRegistry::builtin().unwrap();
    let err = registry.get("NOPE").unwrap_err();
    assert!(matches!(err, EngineError::UnknownElement(key) if key == "NOPE"));
}

#[test]
fn null_density_means_infinite() {
    let registry = ElementRegistry::builtin().unwrap();
    let wall = registry.get("WALL").unwrap();
    assert!(wall.density.is_infinite());

    // And it goes back out as null, not as a non-finite literal.
    let encoded = serde_json::to_value(wall).unwrap();
    assert!(encoded["density"].is_null());
}

#[test]
fn bundle_with_dangling_reference_is_rejected() {
    let bundle = r##"{
      "WATR": {
        "name": "Water", "menu": "Liquids", "color": "#4466ff",
        "displayState": "liquid", "density": 1.0,
        "boilingPoint": 100.0, "boilProduct": "STEM"
      }
    }"##;
    let err = ElementRegistry::from_json(bundle).unwrap_err();
    assert!(matches!(err, EngineError::InvalidBundle(msg) if msg.contains("STEM")));
}

#[test]
fn malformed_json_is_rejected() {
    let err = ElementRegistry::from_json("{ not json").unwrap_err();
    assert!(matches!(err, EngineError::InvalidBundle(_)));
}

#[test]
fn omitted_optional_fields_default_sanely() {
    let bundle = r##"{
      "STUB": {
        "name": "Stub", "menu": "Solids", "color": "#000000",
        "displayState": "solid", "density": 1.0
      }
    }"##;
    let registry = ElementRegistry::from_json(bundle).unwrap();
    let stub = registry.get("STUB").unwrap();
    assert_eq!(stub.conductivity, 0.0);
    assert_eq!(stub.heat_conductivity, 0.0);
    assert!(stub.flammability_threshold.is_none());
    assert!(stub.initial_life.is_none());
    assert!(stub.behavior.is_none());
    assert!(stub.energy_response.is_none());
}
