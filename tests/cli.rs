use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn composer_cmd(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("shortcut-composer").expect("binary exists");
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn test_help_prints_usage() {
    Command::cargo_bin("shortcut-composer")
        .expect("binary exists")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Inspect and edit Shortcut Composer settings",
        ));
}

#[test]
fn test_path_prints_config_override() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("settings.toml");

    composer_cmd(&config)
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("settings.toml"));
}

#[test]
fn test_get_prints_default_value() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("settings.toml");

    composer_cmd(&config)
        .args(["get", "ShortcutComposer", "FPS limit"])
        .assert()
        .success()
        .stdout("60\n");
    assert!(!config.exists());
}

#[test]
fn test_set_persists_value() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("nested").join("settings.toml");

    composer_cmd(&config)
        .args(["set", "ShortcutComposer", "FPS limit", "120"])
        .assert()
        .success();
    let contents = std::fs::read_to_string(&config).unwrap();
    assert!(contents.contains("FPS limit"));

    composer_cmd(&config)
        .args(["get", "ShortcutComposer", "FPS limit"])
        .assert()
        .success()
        .stdout("120\n");
}

#[test]
fn test_set_rejects_malformed_value() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("settings.toml");

    composer_cmd(&config)
        .args(["set", "ShortcutComposer", "FPS limit", "fast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to set ShortcutComposer/FPS limit"));
    assert!(!config.exists());
}

#[test]
fn test_set_list_field_of_pie() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("settings.toml");

    composer_cmd(&config)
        .args(["set", "Pie: Tools", "Values", "MOVE\tCROP"])
        .assert()
        .success();
    composer_cmd(&config)
        .args(["set", "Pie: Tools", "Values", "MOVE\tNOT_A_TOOL"])
        .assert()
        .failure();
    composer_cmd(&config)
        .args(["get", "Pie: Tools", "Values"])
        .assert()
        .success()
        .stdout("MOVE\tCROP\n");
}

#[test]
fn test_get_unknown_setting_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("settings.toml");

    composer_cmd(&config)
        .args(["get", "ShortcutComposer", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting ShortcutComposer/Nope"));
}

#[test]
fn test_reset_restores_defaults() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("settings.toml");

    composer_cmd(&config)
        .args(["set", "ShortcutComposer", "FPS limit", "30"])
        .assert()
        .success();
    composer_cmd(&config)
        .args(["reset", "ShortcutComposer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reset settings of 'ShortcutComposer'"));
    composer_cmd(&config)
        .args(["get", "ShortcutComposer", "FPS limit"])
        .assert()
        .success()
        .stdout("60\n");
}

#[test]
fn test_reset_unknown_group_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("settings.toml");

    composer_cmd(&config)
        .args(["reset", "Nothing here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown settings group"));
}

#[test]
fn test_actions_lists_catalog() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("settings.toml");

    composer_cmd(&config)
        .arg("actions")
        .assert()
        .success()
        .stdout(predicate::str::contains("Opacity (cycle)"))
        .stdout(predicate::str::contains("Rotate brush"))
        .stdout(predicate::str::contains("Pie: Tools"));
}

#[test]
fn test_show_lists_groups() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("settings.toml");

    composer_cmd(&config)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("[ShortcutComposer]"))
        .stdout(predicate::str::contains("FPS limit = 60"));
}
