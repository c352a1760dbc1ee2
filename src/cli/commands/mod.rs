//! CLI command handlers for `curriculum`.
//!
//! Each subcommand is implemented in its own submodule. Handlers return
//! `Err` with a user-facing message; `main` prints it and exits with status 1.

pub mod check;
pub mod config;
pub mod diagram;
pub mod extract;
pub mod pipeline;
pub mod report;

use crate::args::Target;
use curriculum_graph::config::Config;
use curriculum_graph::core::models::Language;

/// Year and language of a command, falling back to the configured defaults
pub fn resolve_target(target: &Target, config: &Config) -> (u16, Language) {
    (
        target.year.unwrap_or(config.defaults.year),
        target.lang.unwrap_or(config.defaults.language),
    )
}
