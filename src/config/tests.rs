use super::*;
use std::sync::atomic::AtomicUsize;

#[test]
fn test_field_reads_default_when_unset() {
    let store = ConfigStore::in_memory();
    let field = Field::new(&store, "Group", "Value", 7_i32);
    assert_eq!(field.read(), 7);
    assert!(store.read_raw(Location::Global, "Group", "Value").is_none());
}

#[test]
fn test_list_field_round_trip_preserves_ints() {
    let store = ConfigStore::in_memory();
    let field: Field<Vec<i32>> = Field::new(&store, "Group", "Order", Vec::new());

    field.write(vec![1, 2, 3]).unwrap();
    assert_eq!(field.read(), vec![1, 2, 3]);
    assert_eq!(
        store.read_raw(Location::Global, "Group", "Order").as_deref(),
        Some("1\t2\t3")
    );

    field.write(Vec::new()).unwrap();
    assert_eq!(field.read(), Vec::<i32>::new());
}

#[test]
fn test_malformed_list_is_rejected_without_partial_write() {
    let store = ConfigStore::in_memory();
    let field: Field<Vec<i32>> = Field::new(&store, "Group", "Order", vec![5]);
    field.write(vec![1, 2]).unwrap();

    let err = field.write_raw("1\tx\t3").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
    assert_eq!(field.read(), vec![1, 2]);

    let err = store
        .write_checked(Location::Global, "Group", "Order", "4\tfive")
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
    assert_eq!(field.read(), vec![1, 2]);
}

#[test]
fn test_write_checked_normalizes_and_rejects_unknown() {
    let store = ConfigStore::in_memory();
    let field = Field::new(&store, "Group", "Scale", 1.0_f64);

    store
        .write_checked(Location::Global, "Group", "Scale", " 2.5 ")
        .unwrap();
    assert_eq!(field.read(), 2.5);
    assert_eq!(
        store.read_raw(Location::Global, "Group", "Scale").as_deref(),
        Some("2.5")
    );

    let err = store
        .write_checked(Location::Global, "Group", "Missing", "1")
        .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownField { .. }));
}

#[test]
fn test_malformed_stored_value_falls_back_to_default() {
    let store = ConfigStore::in_memory();
    let field = Field::new(&store, "Group", "Value", 3_u32);
    store.write_raw(Location::Global, "Group", "Value", "garbage".to_string());
    assert_eq!(field.read(), 3);
}

#[test]
fn test_callbacks_fire_only_on_change() {
    let store = ConfigStore::in_memory();
    let field = Field::new(&store, "Group", "Value", 1_i32);
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    field.register_callback(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    field.write(1).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0, "writing the default is a no-op");

    field.write(2).unwrap();
    field.write(2).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    field.write(3).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_callback_may_read_the_store() {
    let store = ConfigStore::in_memory();
    let field = Field::new(&store, "Group", "Value", 1_i32);
    let seen = Arc::new(AtomicUsize::new(0));

    let reader = field.clone();
    let seen_clone = Arc::clone(&seen);
    field.register_callback(move || {
        seen_clone.store(reader.read() as usize, Ordering::SeqCst);
    });

    field.write(9).unwrap();
    assert_eq!(seen.load(Ordering::SeqCst), 9);
}

#[test]
fn test_on_change_passes_value_without_owning_store() {
    let store = ConfigStore::in_memory();
    let field = Field::new(&store, "Group", "Value", 1_i32);
    let seen = Arc::new(AtomicUsize::new(0));

    let seen_clone = Arc::clone(&seen);
    field.on_change(move |value| {
        seen_clone.store(value as usize, Ordering::SeqCst);
    });
    field.write(5).unwrap();
    assert_eq!(seen.load(Ordering::SeqCst), 5);

    drop(field);
    assert_eq!(Arc::strong_count(&store), 1);
}

#[test]
fn test_group_callback_and_reset() {
    let store = ConfigStore::in_memory();
    let group = FieldGroup::new(&store, "Pie");
    let scale = group.field("Scale", 1.0_f64);
    let name = group.field("Name", "a".to_string());
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    group.register_callback(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    scale.write(2.0).unwrap();
    name.write("b".to_string()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    group.reset_defaults();
    assert_eq!(scale.read(), 1.0);
    assert_eq!(name.read(), "a");
}

#[test]
fn test_set_default_is_independent_of_current_value() {
    let store = ConfigStore::in_memory();
    let field: Field<Vec<String>> = Field::new(&store, "Pie", "Values", vec!["x".to_string()]);

    field.write(vec!["a".to_string(), "b".to_string()]).unwrap();
    field.set_default(vec!["b".to_string()]).unwrap();
    assert_eq!(field.read(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(field.default(), vec!["b".to_string()]);

    field.reset_default().unwrap();
    assert_eq!(field.read(), vec!["b".to_string()]);

    field.write(vec!["c".to_string()]).unwrap();
    store.reset_defaults(Some("Pie"));
    assert_eq!(field.read(), vec!["b".to_string()]);
}

#[test]
fn test_dual_field_follows_save_local() {
    let store = ConfigStore::in_memory();
    let group = FieldGroup::new(&store, "Pie");
    let save_local = group.field("Save local", false);
    let order = group.dual_field("Values", vec![1_i32], &save_local);

    order.write(vec![2]).unwrap();
    assert_eq!(order.read(), vec![2]);

    save_local.write(true).unwrap();
    assert_eq!(order.read(), vec![1], "document location starts from default");
    order.write(vec![3]).unwrap();
    assert_eq!(
        store.read_raw(Location::Document, "Pie", "Values").as_deref(),
        Some("3")
    );

    save_local.write(false).unwrap();
    assert_eq!(order.read(), vec![2]);
}

#[test]
fn test_swap_document_notifies_fields() {
    let store = ConfigStore::in_memory();
    let field = Field::local(&store, "Pie", "Values", 0_i32);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    field.register_callback(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let mut settings = Settings::new();
    settings
        .entry("Pie".to_string())
        .or_default()
        .insert("Values".to_string(), "4".to_string());
    store.swap_document(settings);

    assert_eq!(field.read(), 4);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let previous = store.swap_document(Settings::new());
    assert_eq!(field.read(), 0);
    assert_eq!(previous["Pie"]["Values"], "4");
}

#[test]
fn test_save_and_load_round_trip() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("nested").join("settings.toml");

    let store = ConfigStore::load(&path).unwrap();
    let field: Field<Vec<String>> = Field::new(&store, "Pick tools", "Values", Vec::new());
    field
        .write(vec!["Move".to_string(), "Crop".to_string()])
        .unwrap();
    assert!(store.is_dirty());
    store.save().unwrap();
    assert!(!store.is_dirty());

    let reloaded = ConfigStore::load(&path).unwrap();
    let field: Field<Vec<String>> = Field::new(&reloaded, "Pick tools", "Values", Vec::new());
    assert_eq!(field.read(), vec!["Move".to_string(), "Crop".to_string()]);
}

#[test]
fn test_load_accepts_bare_scalars() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("settings.toml");
    std::fs::write(
        &path,
        "[ShortcutComposer]\n\"FPS limit\" = 120\n\"Pie global scale\" = 1.5\n\n[Pie]\n\"Save local\" = true\n",
    )
    .unwrap();

    let store = ConfigStore::load(&path).unwrap();
    let fps = Field::new(&store, "ShortcutComposer", "FPS limit", 60_u32);
    let scale = Field::new(&store, "ShortcutComposer", "Pie global scale", 1.0_f64);
    let save_local = Field::new(&store, "Pie", "Save local", false);
    assert_eq!(fps.read(), 120);
    assert_eq!(scale.read(), 1.5);
    assert!(save_local.read());
}

#[test]
fn test_load_rejects_invalid_toml() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("settings.toml");
    std::fs::write(&path, "not [valid").unwrap();
    assert!(matches!(
        ConfigStore::load(&path).unwrap_err(),
        ConfigError::Parse { .. }
    ));
}

#[test]
fn test_global_config_clamps_values() {
    let store = ConfigStore::in_memory();
    let config = GlobalConfig::new(&store);

    config.fps_limit.write(1000).unwrap();
    assert_eq!(
        config.tick_interval(),
        std::time::Duration::from_secs_f64(1.0 / 500.0)
    );

    config.short_vs_long_press_time.write(10.0).unwrap();
    assert_eq!(
        config.short_vs_long_press_time(),
        std::time::Duration::from_secs_f64(4.0)
    );

    config.tracker_deadzone.write(500).unwrap();
    assert_eq!(config.tracker_deadzone(), 200);
}
