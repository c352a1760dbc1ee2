//! Integration tests for configuration management

use curriculum_graph::config::{Config, ConfigOverrides, CONFIG_KEYS};
use curriculum_graph::core::diagram::RenderFormat;
use curriculum_graph::core::models::Language;
use curriculum_graph::core::report::ReportFormat;
use curriculum_graph::core::validate::UnknownEdgePolicy;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("nested").join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(!config.logging.level.is_empty());
    assert!(!config.paths.data_dir.is_empty());
    assert!(!config.paths.diagrams_dir.is_empty());
    assert!(!config.paths.reports_dir.is_empty());
    assert_eq!(config.defaults.year, 2025);
    assert_eq!(config.defaults.language, Language::Ua);
    assert_eq!(config.graph.unknown_edges, UnknownEdgePolicy::Warn);
    assert!(config.graph.check_cycles);
    assert_eq!(config.graph.dot_command, "dot");
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[paths]
data_dir = "./data"
diagrams_dir = "./diagrams"
reports_dir = "./reports"

[defaults]
year = 2024
language = "en"
report_format = "md"

[graph]
unknown_edges = "fail"
check_cycles = false
render_format = "svg"
dot_command = "/usr/local/bin/dot"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.data_dir, "./data");
    assert_eq!(config.paths.reports_dir, "./reports");
    assert_eq!(config.defaults.year, 2024);
    assert_eq!(config.defaults.language, Language::En);
    assert_eq!(config.defaults.report_format, ReportFormat::Markdown);
    assert_eq!(config.graph.unknown_edges, UnknownEdgePolicy::Fail);
    assert!(!config.graph.check_cycles);
    assert_eq!(config.graph.render_format, RenderFormat::Svg);
    assert_eq!(config.graph.dot_command, "/usr/local/bin/dot");
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.paths.data_dir, "");
    assert_eq!(config.defaults.year, 0);
    // Missing [graph] keeps the cycle check on
    assert!(config.graph.check_cycles);
}

#[test]
fn test_config_rejects_invalid_language() {
    let toml_str = r#"
[logging]

[defaults]
language = "de"
"#;
    assert!(Config::from_toml(toml_str).is_err());
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$CURRICULUM_HOME/test.log"

[paths]
data_dir = "$CURRICULUM_HOME/data"
reports_dir = "$CURRICULUM_HOME/reports"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("curriculum-graph"));
    assert!(!config.logging.file.contains("$CURRICULUM_HOME"));
    assert!(config.paths.data_dir.ends_with("data"));
    assert!(!config.paths.data_dir.contains("$CURRICULUM_HOME"));
    assert!(!config.paths.reports_dir.contains("$CURRICULUM_HOME"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "DEBUG").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config.set("verbose", "true").expect("Failed to set verbose");
    assert!(config.logging.verbose);

    config.set("year", "2024").expect("Failed to set year");
    assert_eq!(config.defaults.year, 2024);

    config.set("language", "en").expect("Failed to set language");
    assert_eq!(config.get("language").unwrap(), "en");

    config
        .set("unknown-edges", "drop")
        .expect("Failed to set unknown edge policy");
    assert_eq!(config.graph.unknown_edges, UnknownEdgePolicy::Drop);

    config
        .set("report_format", "markdown")
        .expect("Failed to set report format");
    assert_eq!(config.get("report_format").unwrap(), "markdown");

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_validates_values() {
    let mut config = Config::from_defaults();

    assert!(config.set("level", "trace").is_err());
    assert!(config.set("year", "twenty").is_err());
    assert!(config.set("language", "fr").is_err());
    assert!(config.set("check_cycles", "maybe").is_err());
    assert!(config.set("render_format", "jpeg").is_err());

    // Failed sets leave the value alone
    assert_eq!(config.defaults.year, 2025);
}

#[test]
fn test_every_key_is_readable() {
    let config = Config::from_defaults();
    for key in CONFIG_KEYS {
        assert!(config.get(key).is_some(), "{key}");
    }
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("data_dir", "/elsewhere").expect("Failed to set data_dir");
    config.set("check_cycles", "false").expect("Failed to set check_cycles");

    config.unset("data_dir", &defaults).expect("Failed to unset data_dir");
    config
        .unset("check_cycles", &defaults)
        .expect("Failed to unset check_cycles");

    assert_eq!(config.paths.data_dir, defaults.paths.data_dir);
    assert!(config.graph.check_cycles);
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("year", "2026").expect("Failed to set year");
    config.set("language", "en").expect("Failed to set language");
    config.save_to(&config_file).expect("Failed to save config");

    let loaded = Config::load_from(&config_file);
    assert_eq!(loaded.defaults.year, 2026);
    assert_eq!(loaded.defaults.language, Language::En);
}

#[test]
fn test_load_creates_missing_file() {
    let (_temp_dir, config_file) = setup_temp_config();
    assert!(!config_file.exists());

    let config = Config::load_from(&config_file);
    assert!(config_file.exists());
    assert_eq!(config.defaults.year, Config::from_defaults().defaults.year);
}

#[test]
fn test_load_falls_back_on_invalid_file() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::create_dir_all(config_file.parent().unwrap()).unwrap();
    fs::write(&config_file, "this is = = not toml").unwrap();

    let config = Config::load_from(&config_file);
    assert_eq!(config.defaults.year, Config::from_defaults().defaults.year);
    // The broken file is left for the user to fix
    assert_eq!(
        fs::read_to_string(&config_file).unwrap(),
        "this is = = not toml"
    );
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        data_dir: Some("./custom_data".to_string()),
        out_dir: Some("./custom_out".to_string()),
        unknown_edges: Some(UnknownEdgePolicy::Fail),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.data_dir, "./custom_data");
    assert_eq!(config.paths.diagrams_dir, "./custom_out");
    assert_eq!(config.paths.reports_dir, "./custom_out");
    assert_eq!(config.graph.unknown_edges, UnknownEdgePolicy::Fail);
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.data_dir, defaults.paths.data_dir);
    assert_eq!(config.graph.unknown_edges, defaults.graph.unknown_edges);
}

#[test]
fn test_config_display_format() {
    let display_str = format!("{}", Config::from_defaults());

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("[defaults]"));
    assert!(display_str.contains("[graph]"));
    assert!(display_str.contains("unknown_edges = \"warn\""));
    assert!(display_str.contains("check_cycles = true"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[paths]
data_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.paths.data_dir, defaults.paths.data_dir);
    assert_eq!(config.defaults.year, defaults.defaults.year);
    assert_eq!(config.graph.dot_command, "dot");

    // Nothing left to merge
    assert!(!config.merge_defaults(&defaults));
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[defaults]
year = 2023
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    config.merge_defaults(&Config::from_defaults());

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.defaults.year, 2023);
}

#[test]
fn test_get_home_dir() {
    let dir = Config::get_home_dir();

    assert!(dir.to_string_lossy().contains("curriculum-graph"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
