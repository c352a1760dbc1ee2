//! Diagram command handler

use crate::args::Target;
use crate::commands::resolve_target;
use curriculum_graph::config::Config;
use curriculum_graph::core::diagram::diagram_file_name;
use curriculum_graph::core::pipeline::{load_catalog, render_diagram, write_diagram};
use logger::{error, info};
use std::path::Path;

/// Generate the diagram and optionally render it with Graphviz
pub fn run(
    target: &Target,
    output: Option<&Path>,
    render: bool,
    config: &Config,
) -> Result<(), String> {
    let (year, lang) = resolve_target(target, config);

    let catalog = load_catalog(config, year).map_err(|e| {
        error!("Failed to load curriculum {year}: {e}");
        format!("✗ Failed to load curriculum {year}: {e}")
    })?;
    info!(
        "Curriculum loaded: {} disciplines, {} edges",
        catalog.disciplines.len(),
        catalog.edges.len()
    );

    let output = output.map_or_else(
        || config.diagrams_dir().join(diagram_file_name(year, lang)),
        Path::to_path_buf,
    );
    write_diagram(&catalog, lang, &output).map_err(|e| {
        error!("Failed to write diagram: {e}");
        format!("✗ Failed to write diagram: {e}")
    })?;
    println!("✓ Diagram generated: {}", output.display());

    if render {
        if let Some(rendered) =
            render_diagram(&output, &config.graph.dot_command, config.graph.render_format)
        {
            println!("✓ Diagram rendered: {}", rendered.display());
        }
    }

    Ok(())
}
