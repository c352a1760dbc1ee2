//! Graphviz DOT generator for the curriculum diagram
//!
//! Produces a left-to-right digraph with one cluster per term and prerequisite
//! edges colored by the category of the prerequisite discipline. The output is
//! also the input format of [`crate::core::extract`].

use crate::core::models::{Catalog, Category, Language};
use logger::{debug, warn};
use std::fmt::Write;

/// Background of the term clusters
const CLUSTER_COLOR: &str = "#E8F4F8";

/// Edge color when the prerequisite discipline is not in the table
const FALLBACK_EDGE_COLOR: &str = "#666666";

const HEADER: &str = r##"digraph Curriculum {
    rankdir="LR";
    splines="ortho";
    nodesep=0.5;
    ranksep=1.25;
    newrank="true";
    node [shape="box", style="rounded,filled", fontsize=14, width=3, height=1, fontname="Arial Bold"];
    edge [color="#666666", penwidth=1.5];
"##;

/// File name of the diagram for an intake year and language
#[must_use]
pub fn diagram_file_name(year: u16, lang: Language) -> String {
    format!("diagram_bak_{year}_{lang}.gv")
}

/// Escape a label for use inside a double-quoted DOT string
#[must_use]
pub fn escape_label(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Generator for the curriculum diagram
pub struct DiagramGenerator;

impl DiagramGenerator {
    /// Generate the complete DOT text for `catalog` in `lang`
    #[must_use]
    pub fn generate(catalog: &Catalog, lang: Language) -> String {
        let mut output = String::from(HEADER);

        for term in catalog.terms() {
            output.push_str(&Self::term_cluster(catalog, term, lang));
        }

        output.push_str(&Self::edges(catalog, lang));
        output.push_str("}\n");

        debug!(
            "Generated diagram for {} ({lang}): {} disciplines, {} edges",
            catalog.year,
            catalog.disciplines.len(),
            catalog.edges.len()
        );
        output
    }

    /// Cluster for one term. Terms past `catalog.semesters` are left unlabelled.
    fn term_cluster(catalog: &Catalog, term: u8, lang: Language) -> String {
        let disciplines = catalog.disciplines_in_term(term);
        if disciplines.is_empty() {
            return String::new();
        }

        let mut cluster = String::new();
        let _ = writeln!(cluster, "    subgraph cluster_{term} {{");
        let _ = writeln!(cluster, "        style=\"filled\";");
        if term <= catalog.semesters {
            let _ = writeln!(cluster, "        label=\"{}\";", Self::term_label(term, lang));
        }
        let _ = writeln!(cluster, "        color=\"{CLUSTER_COLOR}\";");
        let _ = writeln!(cluster, "        rank=\"same\";");

        for discipline in disciplines {
            let _ = writeln!(
                cluster,
                "        {} [label=\"{}\", fillcolor=\"{}\"];",
                discipline.id,
                escape_label(discipline.name(lang)),
                discipline.category.node_color()
            );
        }

        cluster.push_str("    }\n");
        cluster
    }

    fn term_label(term: u8, lang: Language) -> String {
        match lang {
            Language::Ua => format!("Семестр {term}"),
            Language::En => format!("Semester {term}"),
        }
    }

    /// Edge declarations grouped by the category of the prerequisite
    fn edges(catalog: &Catalog, lang: Language) -> String {
        let mut output = String::new();

        for category in Category::EDGE_GROUP_ORDER {
            let group: Vec<_> = catalog
                .edges
                .iter()
                .filter(|e| catalog.get(&e.from).is_some_and(|d| d.category == category))
                .collect();
            if group.is_empty() {
                continue;
            }

            let _ = writeln!(output, "    // {}", category.group_title(lang));
            for edge in group {
                let _ = writeln!(
                    output,
                    "    {} -> {} [color=\"{}\", penwidth=2];",
                    edge.from,
                    edge.to,
                    category.edge_color()
                );
            }
            output.push('\n');
        }

        let unclassified: Vec<_> = catalog
            .edges
            .iter()
            .filter(|e| !catalog.contains(&e.from))
            .collect();
        if !unclassified.is_empty() {
            output.push_str("    // unknown prerequisite\n");
            for edge in unclassified {
                warn!("Edge {edge} starts at a discipline missing from the table");
                let _ = writeln!(
                    output,
                    "    {} -> {} [color=\"{FALLBACK_EDGE_COLOR}\", penwidth=2];",
                    edge.from, edge.to
                );
            }
            output.push('\n');
        }

        output
    }
}
