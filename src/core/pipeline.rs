//! End-to-end run: table -> diagram -> extraction -> derivation -> report
//!
//! Each step is also exposed on its own so the CLI subcommands can run a single
//! stage against files produced earlier.

use crate::config::Config;
use crate::core::diagram::{diagram_file_name, DiagramGenerator, GraphvizRenderer, RenderFormat};
use crate::core::error::{CurriculumError, Result};
use crate::core::extract::{extract_file, ExtractedGraph};
use crate::core::models::{Catalog, Language};
use crate::core::report::{report_file_name, reporter_for, ReportContext, ReportFormat};
use crate::core::requisites::{derive, snapshot_file_name, RequisiteMap, RequisiteSummary};
use crate::core::validate::{apply_policy, check_acyclic, UnknownEdgePolicy};
use logger::{debug, info, verbose, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Options of a pipeline run that are not part of the configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    /// Render the diagram with Graphviz
    pub render: bool,
    /// Report format; `None` uses the configured default
    pub report_format: Option<ReportFormat>,
}

/// Files written by a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// DOT diagram
    pub diagram: PathBuf,
    /// Rendered diagram, when Graphviz ran successfully
    pub rendered: Option<PathBuf>,
    /// JSON requisite snapshot
    pub snapshot: PathBuf,
    /// Report
    pub report: PathBuf,
    /// Counts of the derived requisites
    pub summary: RequisiteSummary,
    /// Edges ignored because an endpoint is unknown
    pub dropped: usize,
}

impl PipelineOutcome {
    /// Every file written, in creation order
    #[must_use]
    pub fn written_files(&self) -> Vec<&Path> {
        let mut files = vec![self.diagram.as_path()];
        if let Some(rendered) = &self.rendered {
            files.push(rendered);
        }
        files.push(&self.snapshot);
        files.push(&self.report);
        files
    }
}

/// Create `dir` and its parents
///
/// # Errors
/// Returns [`CurriculumError::Io`] naming `dir` on failure.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| CurriculumError::io(dir, e))
}

/// Load the catalog of `year` from the configured data directory
///
/// # Errors
/// Returns the errors of [`Catalog::load`].
pub fn load_catalog(config: &Config, year: u16) -> Result<Catalog> {
    let path = Catalog::path_for(&config.data_dir(), year);
    debug!("Loading curriculum table {}", path.display());
    Catalog::load(&path)
}

/// Generate the diagram of `catalog` and write it to `output`
///
/// # Errors
/// Returns [`CurriculumError::Io`] when the file cannot be written.
pub fn write_diagram(catalog: &Catalog, lang: Language, output: &Path) -> Result<()> {
    let dot = DiagramGenerator::generate(catalog, lang);
    if let Some(parent) = output.parent() {
        ensure_dir(parent)?;
    }
    fs::write(output, dot).map_err(|e| CurriculumError::io(output, e))
}

/// Render `diagram` with Graphviz, skipping with a warning when it is unavailable
///
/// Returns the rendered file on success. Rendering failures are logged and
/// reported as `None`; they never abort a run.
pub fn render_diagram(diagram: &Path, command: &str, format: RenderFormat) -> Option<PathBuf> {
    let renderer = GraphvizRenderer::new(command);
    if !renderer.is_available() {
        warn!(
            "Graphviz '{}' not found; skipping {format} rendering",
            renderer.command()
        );
        return None;
    }

    let output = GraphvizRenderer::output_path(diagram, format);
    match renderer.render(diagram, &output, format) {
        Ok(()) => Some(output),
        Err(e) => {
            warn!("{e}");
            None
        }
    }
}

/// Extract the graph from `diagram`, enforce `policy` and optionally the DAG check
///
/// # Errors
/// Returns [`CurriculumError::Io`] when the diagram cannot be read,
/// [`CurriculumError::UnknownEndpoint`] under [`UnknownEdgePolicy::Fail`] and
/// [`CurriculumError::Cycle`] when `check_cycles` is set and the graph is cyclic.
pub fn extract_checked(
    diagram: &Path,
    policy: UnknownEdgePolicy,
    check_cycles: bool,
) -> Result<ExtractedGraph> {
    let graph = extract_file(diagram)?;
    debug!(
        "Extracted {} nodes and {} edges from {}",
        graph.nodes.len(),
        graph.edges.len(),
        diagram.display()
    );

    apply_policy(&graph, policy)?;
    if check_cycles {
        check_acyclic(graph.nodes.keys(), &graph.edges)?;
    }
    Ok(graph)
}

/// Derive the requisites of `graph` and write the JSON snapshot to `output`
///
/// # Errors
/// Returns [`CurriculumError::Io`] when the snapshot cannot be written.
pub fn write_snapshot(graph: &ExtractedGraph, output: &Path) -> Result<RequisiteMap> {
    let requisites = derive(&graph.labels(), &graph.edges);
    if let Some(parent) = output.parent() {
        ensure_dir(parent)?;
    }
    requisites.save_json(output)?;
    Ok(requisites)
}

/// Render the report of `ctx` in `format` to `output`
///
/// # Errors
/// Returns template or I/O errors of the reporter.
pub fn write_report(ctx: &ReportContext, format: ReportFormat, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        ensure_dir(parent)?;
    }
    reporter_for(format).generate(ctx, output)
}

/// The complete generation pipeline
pub struct Pipeline;

impl Pipeline {
    /// Run every step for `year` in `lang`
    ///
    /// # Errors
    /// Any failing step except Graphviz rendering aborts the run with its error.
    pub fn run(
        config: &Config,
        year: u16,
        lang: Language,
        options: &PipelineOptions,
    ) -> Result<PipelineOutcome> {
        let format = options
            .report_format
            .unwrap_or(config.defaults.report_format);
        let diagrams_dir = config.diagrams_dir();
        let reports_dir = config.reports_dir();

        info!("Running pipeline for {year} ({lang})");

        verbose!("[1/4] Generating diagram");
        let catalog = load_catalog(config, year)?;
        let diagram = diagrams_dir.join(diagram_file_name(year, lang));
        write_diagram(&catalog, lang, &diagram)?;
        info!("Diagram written to {}", diagram.display());

        let rendered = if options.render {
            verbose!("[2/4] Rendering diagram");
            render_diagram(&diagram, &config.graph.dot_command, config.graph.render_format)
        } else {
            None
        };

        verbose!("[3/4] Extracting requisites");
        let graph = extract_checked(
            &diagram,
            config.graph.unknown_edges,
            config.graph.check_cycles,
        )?;
        let snapshot = diagrams_dir.join(snapshot_file_name(year, lang));
        let requisites = write_snapshot(&graph, &snapshot)?;
        info!("Snapshot written to {}", snapshot.display());

        verbose!("[4/4] Rendering {format} report");
        let ctx = ReportContext::new(year, lang, catalog.program.get(lang), &requisites);
        let report = reports_dir.join(report_file_name(year, lang, format));
        write_report(&ctx, format, &report)?;
        info!("Report written to {}", report.display());

        Ok(PipelineOutcome {
            diagram,
            rendered,
            snapshot,
            report,
            summary: requisites.summary(),
            dropped: graph.dropped.len(),
        })
    }
}
