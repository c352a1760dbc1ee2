//! Configuration module for `curriculum-graph`

use crate::core::diagram::RenderFormat;
use crate::core::models::Language;
use crate::core::report::ReportFormat;
use crate::core::validate::UnknownEdgePolicy;
use logger::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to [`Config::get_home_dir`]
const HOME_VARIABLE: &str = "$CURRICULUM_HOME";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding `curriculum_{year}.toml` tables
    #[serde(default)]
    pub data_dir: String,
    /// Directory for diagrams and requisite snapshots
    #[serde(default)]
    pub diagrams_dir: String,
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
}

/// Values used when a command does not name them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Intake year
    #[serde(default)]
    pub year: u16,
    /// Output language
    #[serde(default)]
    pub language: Language,
    /// Report format
    #[serde(default)]
    pub report_format: ReportFormat,
}

const fn default_check_cycles() -> bool {
    true
}

/// Graph processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Handling of edges with an undeclared endpoint
    #[serde(default)]
    pub unknown_edges: UnknownEdgePolicy,
    /// Reject cyclic requisite graphs
    #[serde(default = "default_check_cycles")]
    pub check_cycles: bool,
    /// Graphviz output format
    #[serde(default)]
    pub render_format: RenderFormat,
    /// Graphviz executable
    #[serde(default)]
    pub dot_command: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            unknown_edges: UnknownEdgePolicy::default(),
            check_cycles: default_check_cycles(),
            render_format: RenderFormat::default(),
            dot_command: String::new(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Default year, language and report format
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Graph processing settings
    #[serde(default)]
    pub graph: GraphConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override data directory
    pub data_dir: Option<String>,
    /// Override both diagram and report output directories
    pub out_dir: Option<String>,
    /// Override unknown edge policy
    pub unknown_edges: Option<UnknownEdgePolicy>,
}

/// Keys accepted by [`Config::get`], [`Config::set`] and [`Config::unset`]
pub const CONFIG_KEYS: &[&str] = &[
    "level",
    "file",
    "verbose",
    "data_dir",
    "diagrams_dir",
    "reports_dir",
    "year",
    "language",
    "report_format",
    "unknown_edges",
    "check_cycles",
    "render_format",
    "dot_command",
];

impl Config {
    /// Get the `$CURRICULUM_HOME` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/curriculum-graph`
    /// - macOS: `~/Library/Application Support/curriculum-graph`
    /// - Windows: `%APPDATA%\curriculum-graph`
    #[must_use]
    pub fn get_home_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("curriculum-graph")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty here and non-empty in `defaults` are updated,
    /// so settings added in a newer release show up in an older user file.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        let strings = [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.logging.file, &defaults.logging.file),
            (&mut self.paths.data_dir, &defaults.paths.data_dir),
            (&mut self.paths.diagrams_dir, &defaults.paths.diagrams_dir),
            (&mut self.paths.reports_dir, &defaults.paths.reports_dir),
            (&mut self.graph.dot_command, &defaults.graph.dot_command),
        ];
        for (value, default) in strings {
            if value.is_empty() && !default.is_empty() {
                value.clone_from(default);
                changed = true;
            }
        }

        if self.defaults.year == 0 && defaults.defaults.year != 0 {
            self.defaults.year = defaults.defaults.year;
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only non-`None` values replace config values; the file on disk is untouched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(data_dir) = &overrides.data_dir {
            self.paths.data_dir.clone_from(data_dir);
        }
        if let Some(out_dir) = &overrides.out_dir {
            self.paths.diagrams_dir.clone_from(out_dir);
            self.paths.reports_dir.clone_from(out_dir);
        }

        if let Some(policy) = overrides.unknown_edges {
            self.graph.unknown_edges = policy;
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_home_dir`](Self::get_home_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_home_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$CURRICULUM_HOME` in a string
    fn expand_variables(value: &str) -> String {
        if value.contains(HOME_VARIABLE) {
            let home = Self::get_home_dir();
            value.replace(HOME_VARIABLE, home.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Path values have `$CURRICULUM_HOME` expanded. Missing fields use their
    /// serde defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.data_dir = Self::expand_variables(&config.paths.data_dir);
        config.paths.diagrams_dir = Self::expand_variables(&config.paths.diagrams_dir);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration cannot be parsed. The defaults
    /// are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from the user config file, or create it from defaults
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// Load configuration from `config_file`, or create it from defaults
    ///
    /// An existing file has missing fields merged from the defaults and is saved
    /// back when that changed anything. An unreadable or invalid file falls back
    /// to the defaults without touching it.
    #[must_use]
    pub fn load_from(config_file: &Path) -> Self {
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            // First run
            if let Err(e) = defaults.save_to(config_file) {
                warn!("Could not write default config to {}: {e}", config_file.display());
            }
            return defaults;
        }

        let parsed = fs::read_to_string(config_file)
            .map_err(|e| e.to_string())
            .and_then(|content| Self::from_toml(&content).map_err(|e| e.to_string()));

        match parsed {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save_to(config_file);
                }
                config
            }
            Err(e) => {
                warn!("Ignoring config file {}: {e}", config_file.display());
                defaults
            }
        }
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration to `config_file`
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save_to(&self, config_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Keys are listed in [`CONFIG_KEYS`]; dashes are accepted in place of
    /// underscores.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone(),
            "file" => self.logging.file.clone(),
            "verbose" => self.logging.verbose.to_string(),
            "data_dir" => self.paths.data_dir.clone(),
            "diagrams_dir" => self.paths.diagrams_dir.clone(),
            "reports_dir" => self.paths.reports_dir.clone(),
            "year" => self.defaults.year.to_string(),
            "language" => self.defaults.language.to_string(),
            "report_format" => self.defaults.report_format.to_string(),
            "unknown_edges" => self.graph.unknown_edges.to_string(),
            "check_cycles" => self.graph.check_cycles.to_string(),
            "render_format" => self.graph.render_format.to_string(),
            "dot_command" => self.graph.dot_command.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Set a configuration value by key
    ///
    /// The value is validated for typed settings. Call [`save()`](Config::save)
    /// to persist the change.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be parsed
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => {
                value
                    .parse::<logger::Level>()
                    .map_err(|e| format!("Invalid value for 'level': {e}"))?;
                self.logging.level = value.to_lowercase();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "data_dir" => self.paths.data_dir = value.to_string(),
            "diagrams_dir" => self.paths.diagrams_dir = value.to_string(),
            "reports_dir" => self.paths.reports_dir = value.to_string(),
            "year" => {
                self.defaults.year = value
                    .parse::<u16>()
                    .map_err(|_| format!("Invalid year: '{value}'"))?;
            }
            "language" => self.defaults.language = value.parse()?,
            "report_format" => self.defaults.report_format = value.parse()?,
            "unknown_edges" => self.graph.unknown_edges = value.parse()?,
            "check_cycles" => {
                self.graph.check_cycles = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'check_cycles': '{value}'"))?;
            }
            "render_format" => self.graph.render_format = value.parse()?,
            "dot_command" => self.graph.dot_command = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset a single configuration value to its value in `defaults`
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "data_dir" => self.paths.data_dir.clone_from(&defaults.paths.data_dir),
            "diagrams_dir" => self
                .paths
                .diagrams_dir
                .clone_from(&defaults.paths.diagrams_dir),
            "reports_dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "year" => self.defaults.year = defaults.defaults.year,
            "language" => self.defaults.language = defaults.defaults.language,
            "report_format" => self.defaults.report_format = defaults.defaults.report_format,
            "unknown_edges" => self.graph.unknown_edges = defaults.graph.unknown_edges,
            "check_cycles" => self.graph.check_cycles = defaults.graph.check_cycles,
            "render_format" => self.graph.render_format = defaults.graph.render_format,
            "dot_command" => self
                .graph
                .dot_command
                .clone_from(&defaults.graph.dot_command),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the user config file
    ///
    /// The next [`load()`](Config::load) recreates it. Succeeds if the file is
    /// already gone.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Directory holding the curriculum tables
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.paths.data_dir)
    }

    /// Directory for diagrams and snapshots
    #[must_use]
    pub fn diagrams_dir(&self) -> PathBuf {
        PathBuf::from(&self.paths.diagrams_dir)
    }

    /// Directory for reports
    #[must_use]
    pub fn reports_dir(&self) -> PathBuf {
        PathBuf::from(&self.paths.reports_dir)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  data_dir = \"{}\"", self.paths.data_dir)?;
        writeln!(f, "  diagrams_dir = \"{}\"", self.paths.diagrams_dir)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        writeln!(f, "\n[defaults]")?;
        writeln!(f, "  year = {}", self.defaults.year)?;
        writeln!(f, "  language = \"{}\"", self.defaults.language)?;
        writeln!(f, "  report_format = \"{}\"", self.defaults.report_format)?;

        writeln!(f, "\n[graph]")?;
        writeln!(f, "  unknown_edges = \"{}\"", self.graph.unknown_edges)?;
        writeln!(f, "  check_cycles = {}", self.graph.check_cycles)?;
        writeln!(f, "  render_format = \"{}\"", self.graph.render_format)?;
        writeln!(f, "  dot_command = \"{}\"", self.graph.dot_command)?;

        Ok(())
    }
}
