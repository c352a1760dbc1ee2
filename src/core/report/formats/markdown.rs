//! Markdown report generator
//!
//! One table row per discipline; renders well in GitHub, GitLab and VS Code.

use crate::core::error::Result;
use crate::core::report::{ReportContext, ReportGenerator};
use std::fmt::Write;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/requisites.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Escape table cell content
    fn cell(text: &str) -> String {
        text.replace('|', "\\|")
    }

    fn list(items: &[String], empty: &str) -> String {
        if items.is_empty() {
            format!("_{empty}_")
        } else {
            items
                .iter()
                .map(|item| Self::cell(item))
                .collect::<Vec<_>>()
                .join("<br>")
        }
    }

    fn generate_rows(ctx: &ReportContext) -> String {
        let strings = ctx.strings();
        let mut rows = String::new();

        for (id, record) in ctx.requisites.iter() {
            let _ = writeln!(
                rows,
                "| {} | `{id}` | {} | {} |",
                Self::cell(&record.name),
                Self::list(&record.prerequisites, strings.no_prerequisites),
                Self::list(&record.postrequisites, strings.no_postrequisites)
            );
        }

        rows
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String> {
        let strings = ctx.strings();
        let summary = ctx.summary();

        let mut output = MARKDOWN_TEMPLATE.to_string();
        output = output.replace("{{title}}", strings.title);
        output = output.replace("{{year}}", &ctx.year.to_string());
        output = output.replace("{{program}}", ctx.program);
        output = output.replace("{{total_label}}", strings.total);
        output = output.replace("{{links_label}}", strings.links);
        output = output.replace("{{discipline_count}}", &summary.disciplines.to_string());
        output = output.replace("{{link_count}}", &summary.links.to_string());
        output = output.replace("{{discipline_heading}}", strings.discipline);
        output = output.replace("{{prerequisites_heading}}", strings.prerequisites);
        output = output.replace("{{postrequisites_heading}}", strings.postrequisites);
        output = output.replace("{{rows}}", &Self::generate_rows(ctx));

        Ok(output)
    }
}
