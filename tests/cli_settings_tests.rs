//! End-to-end tests for `course-columns settings` and `course-columns defaults`.

use std::process::{Command, Output};

mod fixtures;

use fixtures::temp_config_dir;
use tempfile::TempDir;

/// Path to the course-columns binary
fn course_columns_bin() -> &'static str {
    env!("CARGO_BIN_EXE_course-columns")
}

/// Runs the binary against an isolated config directory.
fn run(config_dir: &TempDir, args: &[&str]) -> Output {
    Command::new(course_columns_bin())
        .env("COURSE_COLUMNS_CONFIG_DIR", config_dir.path())
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn show_json(config_dir: &TempDir, course: &str) -> serde_json::Value {
    let output = run(config_dir, &["settings", "show", "--course", course, "--json"]);
    assert_eq!(output.status.code(), Some(0));
    serde_json::from_slice(&output.stdout).expect("Should parse JSON")
}

#[test]
fn test_show_without_record_uses_defaults() {
    let config_dir = temp_config_dir();
    let result = show_json(&config_dir, "3");

    assert_eq!(result["course"], 3);
    assert_eq!(result["stored"], false);
    assert_eq!(result["columns"], 2);
    assert_eq!(result["orientation"], "horizontal");
    assert_eq!(result["course_display"], "single");
}

#[test]
fn test_set_then_show() {
    let config_dir = temp_config_dir();
    let output = run(
        &config_dir,
        &[
            "settings",
            "set",
            "--course",
            "3",
            "--columns",
            "3",
            "--orientation",
            "vertical",
            "--display",
            "multi",
        ],
    );
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("3 column(s), vertical, multi page"));

    let result = show_json(&config_dir, "3");
    assert_eq!(result["stored"], true);
    assert_eq!(result["columns"], 3);
    assert_eq!(result["orientation"], "vertical");
    assert_eq!(result["course_display"], "multi");
}

#[test]
fn test_set_rejects_out_of_range_columns() {
    let config_dir = temp_config_dir();
    for columns in ["0", "5", "-1"] {
        let output = run(
            &config_dir,
            &["settings", "set", "--course", "3", "--columns", columns],
        );
        assert_eq!(output.status.code(), Some(1), "columns {columns}");
        assert!(String::from_utf8_lossy(&output.stderr).contains("between 1 and 4"));
    }
    assert!(!config_dir.path().join("settings.toml").exists());
}

#[test]
fn test_set_requires_an_option() {
    let config_dir = temp_config_dir();
    let output = run(&config_dir, &["settings", "set", "--course", "3"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_set_with_reset_restores_defaults() {
    let config_dir = temp_config_dir();
    run(&config_dir, &["settings", "set", "--course", "8", "--columns", "4"]);

    let output = run(
        &config_dir,
        &["settings", "set", "--course", "8", "--columns", "1", "--reset"],
    );
    assert_eq!(output.status.code(), Some(0));

    let result = show_json(&config_dir, "8");
    assert_eq!(result["columns"], 2);
    assert_eq!(result["orientation"], "horizontal");
}

#[test]
fn test_reset_all_and_delete() {
    let config_dir = temp_config_dir();
    run(&config_dir, &["settings", "set", "--course", "1", "--columns", "4"]);
    run(&config_dir, &["settings", "set", "--course", "2", "--columns", "3"]);

    let output = run(&config_dir, &["settings", "reset", "--all"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Reset 2 course(s)"));
    assert_eq!(show_json(&config_dir, "1")["columns"], 2);

    let output = run(&config_dir, &["settings", "delete", "--course", "2"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Removed settings of course 2"));
    assert_eq!(show_json(&config_dir, "2")["stored"], false);
}

#[test]
fn test_reset_requires_scope() {
    let config_dir = temp_config_dir();
    let output = run(&config_dir, &["settings", "reset"]);
    assert_ne!(output.status.code(), Some(0));
}

#[test]
fn test_defaults_set_seeds_new_courses() {
    let config_dir = temp_config_dir();
    let output = run(
        &config_dir,
        &[
            "defaults",
            "set",
            "--columns",
            "3",
            "--orientation",
            "vertical",
            "--responsive",
            "on",
        ],
    );
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(config_dir.path().join("config.toml").exists());

    let output = run(&config_dir, &["defaults", "show", "--json"]);
    let defaults: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(defaults["columns"], 3);
    assert_eq!(defaults["orientation"], "vertical");
    assert_eq!(defaults["responsive"], true);

    let result = show_json(&config_dir, "40");
    assert_eq!(result["columns"], 3);
    assert_eq!(result["orientation"], "vertical");
}

#[test]
fn test_defaults_set_rejects_out_of_range() {
    let config_dir = temp_config_dir();
    let output = run(&config_dir, &["defaults", "set", "--columns", "7"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!config_dir.path().join("config.toml").exists());
}

#[test]
fn test_broken_config_is_a_validation_error() {
    let config_dir = temp_config_dir();
    std::fs::write(config_dir.path().join("config.toml"), "[defaults]\ncolumns = 9\n").unwrap();

    let output = run(&config_dir, &["settings", "show", "--course", "1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load configuration"));
}

#[test]
fn test_defaults_set_repairs_invalid_config_and_keeps_paths() {
    let config_dir = temp_config_dir();
    let data_dir = config_dir.path().join("courses");
    std::fs::write(
        config_dir.path().join("config.toml"),
        format!(
            "[defaults]\ncolumns = 7\norientation = \"vertical\"\n\n[paths]\ndata_dir = {:?}\n",
            data_dir.display().to_string()
        ),
    )
    .unwrap();

    let output = run(&config_dir, &["defaults", "set", "--columns", "3"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let output = run(&config_dir, &["defaults", "show", "--json"]);
    assert_eq!(output.status.code(), Some(0));
    let defaults: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(defaults["columns"], 3);
    assert_eq!(defaults["orientation"], "vertical");
    assert_eq!(defaults["data_dir"], data_dir.display().to_string());
}

#[test]
fn test_defaults_set_keeps_invalid_config_it_cannot_repair() {
    let config_dir = temp_config_dir();
    let original = "[defaults]\ncolumns = 7\n\n[paths]\ndata_dir = \"/srv/courses\"\n";
    std::fs::write(config_dir.path().join("config.toml"), original).unwrap();

    let output = run(&config_dir, &["defaults", "set", "--orientation", "vertical"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid configuration"));

    let stored = std::fs::read_to_string(config_dir.path().join("config.toml")).unwrap();
    assert_eq!(stored, original);
}

#[test]
fn test_defaults_set_rejects_unparseable_config() {
    let config_dir = temp_config_dir();
    let original = "[defaults\ncolumns = 2\n";
    std::fs::write(config_dir.path().join("config.toml"), original).unwrap();

    let output = run(&config_dir, &["defaults", "set", "--columns", "3"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load configuration"));

    let stored = std::fs::read_to_string(config_dir.path().join("config.toml")).unwrap();
    assert_eq!(stored, original);
}
