//! Recovery of disciplines and prerequisite edges from a curriculum diagram
//!
//! Node declarations look like `S1_Alg [label="...", fillcolor="#4A90E2"]` and
//! edges like `S1_Alg -> S2_Alg`. Nodes without a fill color (layout helpers)
//! are not disciplines. Edges are kept in textual order; an edge is only kept
//! when both endpoints are declared nodes, the rest end up in
//! [`ExtractedGraph::dropped`] so the caller can decide what to do with them.

use crate::core::error::{CurriculumError, Result};
use crate::core::models::{plain_label, Catalog, Edge, Language};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static NODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\w+)\s*\[label="((?:[^"\\]|\\.)+)"[^\]]*fillcolor="([^"]+)""#)
        .expect("node pattern is valid")
});

static EDGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s*->\s*(\w+)").expect("edge pattern is valid"));

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(?:[^"\\]|\\.)*""#).expect("quoted pattern is valid"));

// Quoted spans are matched first so "//" inside a label is not a comment
static QUOTED_OR_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(?:[^"\\]|\\.)*"|//[^\n]*|/\*(?s:.*?)\*/"#)
        .expect("comment pattern is valid")
});

/// A discipline node found in the diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    /// Single-line display label
    pub label: String,
    /// Fill color as written in the diagram
    pub color: String,
}

/// Nodes and edges of a curriculum graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedGraph {
    /// Discipline id -> node
    pub nodes: BTreeMap<String, NodeInfo>,
    /// Edges whose endpoints are both known, in order of appearance
    pub edges: Vec<Edge>,
    /// Edges excluded because an endpoint is unknown
    pub dropped: Vec<Edge>,
}

impl ExtractedGraph {
    /// Build the graph directly from the curriculum table
    #[must_use]
    pub fn from_catalog(catalog: &Catalog, lang: Language) -> Self {
        let nodes = catalog
            .disciplines
            .iter()
            .map(|d| {
                (
                    d.id.clone(),
                    NodeInfo {
                        label: d.label(lang),
                        color: d.category.node_color().to_string(),
                    },
                )
            })
            .collect();

        let mut graph = Self {
            nodes,
            ..Self::default()
        };
        for edge in &catalog.edges {
            graph.push_edge(edge.clone());
        }
        graph
    }

    /// Discipline id -> label
    #[must_use]
    pub fn labels(&self) -> BTreeMap<String, String> {
        self.nodes
            .iter()
            .map(|(id, node)| (id.clone(), node.label.clone()))
            .collect()
    }

    fn push_edge(&mut self, edge: Edge) {
        if self.nodes.contains_key(&edge.from) && self.nodes.contains_key(&edge.to) {
            self.edges.push(edge);
        } else {
            self.dropped.push(edge);
        }
    }
}

/// Undo [`crate::core::diagram::escape_label`] and flatten the label to one line
fn unescape_label(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n' | 'l' | 'r') => out.push(' '),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    plain_label(&out)
}

/// Remove `//` and `/* */` comments, leaving quoted text untouched
fn strip_comments(text: &str) -> Cow<'_, str> {
    QUOTED_OR_COMMENT.replace_all(text, |caps: &Captures| {
        let matched = &caps[0];
        if matched.starts_with('"') {
            matched.to_string()
        } else {
            String::new()
        }
    })
}

/// Extract nodes and edges from diagram text
#[must_use]
pub fn extract_graph(text: &str) -> ExtractedGraph {
    let mut graph = ExtractedGraph::default();
    let text = strip_comments(text);

    for caps in NODE_PATTERN.captures_iter(&text) {
        graph.nodes.insert(
            caps[1].to_string(),
            NodeInfo {
                label: unescape_label(&caps[2]),
                color: caps[3].to_string(),
            },
        );
    }

    // Labels may contain "->" and must not produce edges
    let blanked = QUOTED.replace_all(&text, "\"\"");
    for caps in EDGE_PATTERN.captures_iter(&blanked) {
        graph.push_edge(Edge::new(&caps[1], &caps[2]));
    }

    graph
}

/// Read a diagram file
///
/// # Errors
/// Returns [`CurriculumError::Io`] when the file cannot be read.
pub fn load_diagram(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| CurriculumError::io(path, e))
}

/// Read a diagram file and extract its graph
///
/// # Errors
/// Returns [`CurriculumError::Io`] when the file cannot be read.
pub fn extract_file(path: &Path) -> Result<ExtractedGraph> {
    load_diagram(path).map(|text| extract_graph(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIAGRAM: &str = r##"digraph Curriculum {
    subgraph cluster_1 {
        label="Semester 1";
        A [label="Algebra", fillcolor="#4A90E2"];
        B [label="Mechanics", fillcolor="#E85D75"];
    }
    subgraph cluster_9 {
        C [label="Field\nTheory", fillcolor="#E85D75"];
        _dummy1 [label="", shape=point, width=0, height=0];
    }
    // PREREQUISITES -> everything
    A -> C [color="#4A90E2", penwidth=2];
    B     -> C        [color="#E85D75", penwidth=2];
    A -> Z [color="#4A90E2", penwidth=2];
}
"##;

    #[test]
    fn test_nodes_extracted() {
        let graph = extract_graph(DIAGRAM);
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.nodes["C"].label, "Field Theory");
        assert_eq!(graph.nodes["A"].color, "#4A90E2");
        assert!(!graph.nodes.contains_key("_dummy1"));
    }

    #[test]
    fn test_edges_in_textual_order() {
        let graph = extract_graph(DIAGRAM);
        assert_eq!(graph.edges, vec![Edge::new("A", "C"), Edge::new("B", "C")]);
    }

    #[test]
    fn test_unknown_endpoint_dropped() {
        let graph = extract_graph(DIAGRAM);
        assert_eq!(graph.dropped, vec![Edge::new("A", "Z")]);
    }

    #[test]
    fn test_arrows_in_labels_are_not_edges() {
        let text = r##"
            A [label="A -> B", fillcolor="#fff"];
            B [label="B", fillcolor="#fff"];
        "##;
        let graph = extract_graph(text);
        assert!(graph.edges.is_empty());
        assert_eq!(graph.nodes["A"].label, "A -> B");
    }

    #[test]
    fn test_commented_out_nodes_and_edges_ignored() {
        let text = r##"
            A [label="Algebra", fillcolor="#fff"];
            B [label="Mechanics", fillcolor="#fff"];
            // X [label="Retired", fillcolor="#fff"];
            /* Y [label="Draft", fillcolor="#fff"];
               A -> Y */
            // A -> B
            B -> A
        "##;
        let graph = extract_graph(text);
        assert_eq!(graph.nodes.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(graph.edges, vec![Edge::new("B", "A")]);
        assert!(graph.dropped.is_empty());
    }

    #[test]
    fn test_slashes_inside_labels_kept() {
        let text = r##"U [label="Input // Output", fillcolor="#fff"];"##;
        let graph = extract_graph(text);
        assert_eq!(graph.nodes["U"].label, "Input // Output");
    }

    #[test]
    fn test_escaped_quotes_in_label() {
        let text = r##"Q [label="The \"Quoted\" Course", fillcolor="#fff"];"##;
        let graph = extract_graph(text);
        assert_eq!(graph.nodes["Q"].label, "The \"Quoted\" Course");
    }

    #[test]
    fn test_unicode_labels() {
        let text = r##"S1_Ukr [label="Українська мова\n за проф. спрямуванням", fillcolor="#B8B8B8"];"##;
        let graph = extract_graph(text);
        assert_eq!(graph.nodes["S1_Ukr"].label, "Українська мова за проф. спрямуванням");
    }

    #[test]
    fn test_missing_file() {
        let err = extract_file(Path::new("/nonexistent/diagram.gv")).unwrap_err();
        assert!(err.is_not_found());
    }
}
