//! CLI argument definitions for `curriculum`

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use curriculum_graph::config::ConfigOverrides;
use curriculum_graph::core::models::Language;
use curriculum_graph::core::report::ReportFormat;
use curriculum_graph::core::validate::UnknownEdgePolicy;
use logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level` for
/// runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

/// Year and language shared by the generation subcommands
#[derive(Debug, Clone, Default, Args)]
pub struct Target {
    /// Intake year (defaults to config `year`)
    #[arg(short, long, value_name = "YEAR")]
    pub year: Option<u16>,

    /// Language: ua or en (defaults to config `language`)
    #[arg(short, long, value_name = "LANG")]
    pub lang: Option<Language>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `year`, `data_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate the Graphviz diagram of a curriculum table.
    Diagram {
        #[command(flatten)]
        target: Target,

        /// Output file (defaults to `diagram_bak_{year}_{lang}.gv` in `diagrams_dir`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also render the diagram with Graphviz
        #[arg(long)]
        render: bool,
    },
    /// Extract prerequisites and postrequisites from a diagram.
    ///
    /// Writes the JSON requisite snapshot.
    Extract {
        #[command(flatten)]
        target: Target,

        /// Diagram to read (defaults to the generated diagram of year and language)
        #[arg(short, long, value_name = "DIAGRAM")]
        input: Option<PathBuf>,

        /// Snapshot file (defaults to `prerequisites_{year}_{lang}.json` in `diagrams_dir`)
        #[arg(short, long, value_name = "JSON")]
        output: Option<PathBuf>,
    },
    /// Render a report from a requisite snapshot.
    Report {
        #[command(flatten)]
        target: Target,

        /// Snapshot to read (defaults to the snapshot of year and language)
        #[arg(short, long, value_name = "JSON")]
        input: Option<PathBuf>,

        /// Report format: html, markdown (md) or json (defaults to config `report_format`)
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<ReportFormat>,

        /// Output file (defaults to `requisites_bachelor_{year}_{lang}.{ext}` in `reports_dir`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Run every step: diagram, render, extract, report.
    Pipeline {
        #[command(flatten)]
        target: Target,

        /// Skip Graphviz rendering
        #[arg(long)]
        no_render: bool,

        /// Report format: html, markdown (md) or json (defaults to config `report_format`)
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<ReportFormat>,
    },
    /// Validate a curriculum table: unknown endpoints, cycles and term order.
    Check {
        /// Intake year (defaults to config `year`)
        #[arg(short, long, value_name = "YEAR")]
        year: Option<u16>,
    },
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "curriculum",
    about = "Curriculum requisite graph toolkit",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug", global = true)]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config data directory
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Override config diagram and report output directories
    #[arg(long = "out-dir", value_name = "DIR", global = true)]
    pub out_dir: Option<PathBuf>,

    /// Override handling of edges with unknown endpoints (drop|warn|fail)
    #[arg(long = "unknown-edges", value_name = "POLICY", global = true)]
    pub unknown_edges: Option<UnknownEdgePolicy>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` means no override. Overrides only apply to the current run and are
    /// never written back to the config file.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.log_level.map(|lvl| lvl.to_string()),
            file: self
                .log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.verbose.then_some(true),
            data_dir: self
                .data_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            out_dir: self
                .out_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            unknown_edges: self.unknown_edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("curriculum").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = parse(&["check"]).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.data_dir.is_none());
        assert!(overrides.out_dir.is_none());
        assert!(overrides.unknown_edges.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = parse(&[
            "pipeline",
            "--year",
            "2024",
            "--out-dir",
            "/output",
            "--data-dir",
            "/data",
            "--unknown-edges",
            "fail",
            "-v",
        ]);

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.out_dir, Some("/output".to_string()));
        assert_eq!(overrides.data_dir, Some("/data".to_string()));
        assert_eq!(overrides.unknown_edges, Some(UnknownEdgePolicy::Fail));
        assert_eq!(overrides.verbose, Some(true));
    }

    #[test]
    fn test_target_flags() {
        match parse(&["diagram", "-y", "2025", "-l", "en", "--render"]).command {
            Command::Diagram { target, render, .. } => {
                assert_eq!(target.year, Some(2025));
                assert_eq!(target.lang, Some(Language::En));
                assert!(render);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_invalid_language_rejected() {
        let result = Cli::try_parse_from(["curriculum", "diagram", "--lang", "de"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_report_format_parsed() {
        match parse(&["report", "-f", "md"]).command {
            Command::Report { format, .. } => assert_eq!(format, Some(ReportFormat::Markdown)),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
