use layout::{
    ComponentDefinition, ComponentKind, LayoutDefinition, LayoutError, OrderingPolicy,
    TimeSettings,
};

fn sample_layout() -> LayoutDefinition {
    let mut value = ComponentDefinition::new("ens_a", ComponentKind::Value, 2);
    value.legend_labels = vec!["x".to_string(), "y".to_string()];
    value.show_legend = true;
    value.ordering = OrderingPolicy::Rewind;
    let html = ComponentDefinition::new("node_html", ComponentKind::HtmlView, 1);
    LayoutDefinition {
        name: "test".to_string(),
        time: TimeSettings::default(),
        components: vec![value, html],
    }
}

#[test]
fn save_and_load_json_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.json");
    let layout = sample_layout();

    layout.save_to_file(&path).unwrap();
    let loaded = LayoutDefinition::load_from_file(&path).unwrap();

    assert_eq!(loaded.name, layout.name);
    assert_eq!(loaded.time, layout.time);
    assert_eq!(loaded.components.len(), 2);
    let value = loaded.component("ens_a").unwrap();
    assert_eq!(value.kind, ComponentKind::Value);
    assert_eq!(value.ordering, OrderingPolicy::Rewind);
    assert!(value.show_legend);
}

#[test]
fn save_and_load_toml_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.toml");
    let layout = sample_layout();

    layout.save_to_file(&path).unwrap();
    let loaded = LayoutDefinition::load_from_file(&path).unwrap();

    assert_eq!(loaded.components.len(), 2);
    assert_eq!(
        loaded.component("node_html").unwrap().kind,
        ComponentKind::HtmlView
    );
}

#[test]
fn missing_fields_take_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("minimal.json");
    std::fs::write(
        &path,
        r#"{"name": "m", "components": [{"uid": "a", "kind": "spa_similarity"}]}"#,
    )
    .unwrap();

    let loaded = LayoutDefinition::load_from_file(&path).unwrap();
    let component = loaded.component("a").unwrap();
    assert_eq!(loaded.time, TimeSettings::default());
    assert_eq!(component.n_lines, 1);
    assert_eq!(component.synapse(), 0.0);
    assert_eq!(component.ordering, OrderingPolicy::Reject);
    assert_eq!(component.min_value, -1.0);
    assert_eq!(component.max_value, 1.0);
}

#[test]
fn validate_accepts_sample_layout() {
    sample_layout().validate().unwrap();
}

#[test]
fn validate_rejects_duplicate_uids() {
    let mut layout = sample_layout();
    layout.components[1].uid = "ens_a".to_string();
    assert!(matches!(layout.validate(), Err(LayoutError::Invalid(_))));
}

#[test]
fn validate_rejects_bad_components() {
    let mut layout = sample_layout();
    layout.components[0].n_lines = 0;
    assert!(layout.validate().is_err());

    let mut layout = sample_layout();
    layout.components[0].synapse = Some(1.0);
    assert!(layout.validate().is_err());

    let mut layout = sample_layout();
    layout.components[0].min_value = 2.0;
    assert!(layout.validate().is_err());
}

#[test]
fn validate_rejects_bad_time_settings() {
    let mut layout = sample_layout();
    layout.time.kept_time = 0.1;
    assert!(layout.validate().is_err());

    let mut layout = sample_layout();
    layout.time.dt = 0.0;
    assert!(layout.validate().is_err());
}

#[test]
fn toml_with_invalid_utf8_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    let mut data = b"name = \"".to_vec();
    data.extend_from_slice(&[0xff, 0xfe]);
    data.extend_from_slice(b"\"\n");
    std::fs::write(&path, data).unwrap();

    let err = LayoutDefinition::load_from_file(&path).unwrap_err();
    assert!(matches!(err, LayoutError::Io(_)));
}
