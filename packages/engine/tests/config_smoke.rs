use sandfall_engine::elements::ElementType;
use sandfall_engine::{EngineConfig, ExecutionModel, WorldCore};

#[test]
fn manifest_lists_every_element() {
    let manifest: serde_json::Value =
        serde_json::from_str(&sandfall_engine::element_manifest()).expect("manifest should parse");
    let entries = manifest.as_array().expect("manifest is an array");
    assert_eq!(entries.len(), ElementType::ALL.len());
    assert_eq!(entries[0]["name"], "background");
}

#[test]
fn world_from_config_json() {
    let world = WorldCore::from_config_json(
        r#"{"width": 40, "height": 20, "model": "scanline", "particleCapacity": 16}"#,
    )
    .expect("config should load");
    assert_eq!((world.width(), world.height()), (40, 20));
    assert_eq!(world.model(), ExecutionModel::Scanline);
    assert_eq!(world.particles().capacity(), 16);

    let echoed = EngineConfig::from_json(&world.config().to_json()).unwrap();
    assert_eq!(&echoed, world.config());
}

#[test]
fn world_rejects_invalid_config() {
    assert!(WorldCore::from_config_json(r#"{"height": 0}"#).is_err());
    assert!(WorldCore::from_config_json(r#"{"model": "quantum"}"#).is_err());
}
