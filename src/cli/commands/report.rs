//! Report command handler
//!
//! Renders a requisite snapshot as HTML, Markdown or JSON.

use crate::args::Target;
use crate::commands::resolve_target;
use curriculum_graph::config::Config;
use curriculum_graph::core::pipeline::{load_catalog, write_report};
use curriculum_graph::core::report::{report_file_name, ReportContext, ReportFormat};
use curriculum_graph::core::requisites::{snapshot_file_name, RequisiteMap};
use logger::{debug, error, info};
use std::path::Path;

/// Run the report command
pub fn run(
    target: &Target,
    input: Option<&Path>,
    format: Option<ReportFormat>,
    output: Option<&Path>,
    config: &Config,
) -> Result<(), String> {
    let (year, lang) = resolve_target(target, config);
    let format = format.unwrap_or(config.defaults.report_format);

    let input = input.map_or_else(
        || config.diagrams_dir().join(snapshot_file_name(year, lang)),
        Path::to_path_buf,
    );
    let requisites = RequisiteMap::load_json(&input).map_err(|e| {
        error!("Failed to load snapshot {}: {e}", input.display());
        format!("✗ Failed to load {}: {e}", input.display())
    })?;
    info!("Snapshot loaded: {} disciplines", requisites.len());

    // The program title is optional decoration
    let program = match load_catalog(config, year) {
        Ok(catalog) => catalog.program.get(lang).to_string(),
        Err(e) => {
            debug!("No program title for {year}: {e}");
            String::new()
        }
    };

    let output = output.map_or_else(
        || config.reports_dir().join(report_file_name(year, lang, format)),
        Path::to_path_buf,
    );
    let ctx = ReportContext::new(year, lang, &program, &requisites);
    write_report(&ctx, format, &output).map_err(|e| {
        error!("Report generation failed: {e}");
        format!("✗ Failed to generate report: {e}")
    })?;

    println!("✓ Report generated: {}", output.display());
    Ok(())
}
