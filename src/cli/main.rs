//! Command-line interface entry point for `curriculum`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use curriculum_graph::config::Config;
use logger::{enable_debug, enable_verbose, error, info, init_file_logging, set_level, Level};
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    // The config command edits the file, so it works on the unmodified config
    let mut stored = Config::load();
    let defaults = Config::from_defaults();
    let mut config = stored.clone();
    config.apply_overrides(&args.to_config_overrides());

    init_logging(&args, &config);

    let result = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut stored, &defaults)
        }
        Command::Diagram {
            target,
            output,
            render,
        } => commands::diagram::run(&target, output.as_deref(), render, &config),
        Command::Extract {
            target,
            input,
            output,
        } => commands::extract::run(&target, input.as_deref(), output.as_deref(), &config),
        Command::Report {
            target,
            input,
            format,
            output,
        } => commands::report::run(&target, input.as_deref(), format, output.as_deref(), &config),
        Command::Pipeline {
            target,
            no_render,
            format,
        } => commands::pipeline::run(&target, !no_render, format, &config),
        Command::Check { year } => commands::check::run(year, &config),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Apply level, debug, verbose and file sink settings
fn init_logging(args: &Cli, config: &Config) {
    // CLI flag overrides config; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    if config.logging.file.is_empty() {
        return;
    }

    let log_path = PathBuf::from(&config.logging.file);
    let display_path = log_path.to_string_lossy();
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match init_file_logging(&log_path) {
        Ok(()) => {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        }
        Err(e) => {
            error!("Failed to initialize file logging at {display_path}: {e}");
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }
}
