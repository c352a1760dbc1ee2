//! Pipeline command handler

use crate::args::Target;
use crate::commands::resolve_target;
use curriculum_graph::config::Config;
use curriculum_graph::core::pipeline::{Pipeline, PipelineOptions};
use curriculum_graph::core::report::ReportFormat;
use logger::error;

/// Run the complete pipeline and list the files it wrote
pub fn run(
    target: &Target,
    render: bool,
    format: Option<ReportFormat>,
    config: &Config,
) -> Result<(), String> {
    let (year, lang) = resolve_target(target, config);
    let options = PipelineOptions {
        render,
        report_format: format,
    };

    println!("\n=== Curriculum {year} ({lang}) ===\n");

    let outcome = Pipeline::run(config, year, lang, &options).map_err(|e| {
        error!("Pipeline failed for {year} ({lang}): {e}");
        format!("✗ Pipeline failed: {e}")
    })?;

    for file in outcome.written_files() {
        println!("✓ {}", file.display());
    }
    println!(
        "\n{} disciplines, {} prerequisite links",
        outcome.summary.disciplines, outcome.summary.links
    );
    if outcome.dropped > 0 {
        println!("⚠ {} edge(s) ignored: unknown endpoint", outcome.dropped);
    }
    Ok(())
}
