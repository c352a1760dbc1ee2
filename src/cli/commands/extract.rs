//! Extract command handler
//!
//! Reads a diagram, derives direct prerequisites and postrequisites and writes
//! the JSON snapshot.

use crate::args::Target;
use crate::commands::resolve_target;
use curriculum_graph::config::Config;
use curriculum_graph::core::diagram::diagram_file_name;
use curriculum_graph::core::pipeline::{extract_checked, write_snapshot};
use curriculum_graph::core::requisites::snapshot_file_name;
use logger::{error, verbose};
use std::path::Path;

/// Run the extract command
pub fn run(
    target: &Target,
    input: Option<&Path>,
    output: Option<&Path>,
    config: &Config,
) -> Result<(), String> {
    let (year, lang) = resolve_target(target, config);

    let input = input.map_or_else(
        || config.diagrams_dir().join(diagram_file_name(year, lang)),
        Path::to_path_buf,
    );
    let output = output.map_or_else(
        || config.diagrams_dir().join(snapshot_file_name(year, lang)),
        Path::to_path_buf,
    );

    let graph = extract_checked(&input, config.graph.unknown_edges, config.graph.check_cycles)
        .map_err(|e| {
            error!("Extraction failed for {}: {e}", input.display());
            format!("✗ Extraction failed: {e}")
        })?;

    let requisites = write_snapshot(&graph, &output).map_err(|e| {
        error!("Failed to write snapshot: {e}");
        format!("✗ Failed to write snapshot: {e}")
    })?;

    let summary = requisites.summary();
    verbose!(
        "{} disciplines, {} links, {} without prerequisites, {} without postrequisites",
        summary.disciplines,
        summary.links,
        summary.roots.len(),
        summary.leaves.len()
    );
    println!("✓ Requisites extracted: {}", output.display());
    Ok(())
}
