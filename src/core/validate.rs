//! Consistency checks applied between extraction and derivation

use crate::core::error::{CurriculumError, Result};
use crate::core::extract::ExtractedGraph;
use crate::core::models::{Catalog, Edge};
use logger::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;
use std::str::FromStr;

/// What to do with edges that reference an undeclared discipline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownEdgePolicy {
    /// Discard silently
    Drop,
    /// Discard and log each edge at warn level
    #[default]
    Warn,
    /// Abort with [`CurriculumError::UnknownEndpoint`]
    Fail,
}

impl FromStr for UnknownEdgePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "drop" => Ok(Self::Drop),
            "warn" => Ok(Self::Warn),
            "fail" => Ok(Self::Fail),
            _ => Err(format!(
                "Unknown edge policy must be 'drop', 'warn' or 'fail', got '{s}'"
            )),
        }
    }
}

impl fmt::Display for UnknownEdgePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Drop => "drop",
            Self::Warn => "warn",
            Self::Fail => "fail",
        })
    }
}

/// Enforce `policy` on the edges extraction dropped
///
/// # Errors
/// Returns [`CurriculumError::UnknownEndpoint`] for the first dropped edge when
/// `policy` is [`UnknownEdgePolicy::Fail`].
pub fn apply_policy(graph: &ExtractedGraph, policy: UnknownEdgePolicy) -> Result<()> {
    match policy {
        UnknownEdgePolicy::Drop => {
            debug!("Dropped {} edge(s) with unknown endpoints", graph.dropped.len());
        }
        UnknownEdgePolicy::Warn => {
            for edge in &graph.dropped {
                warn!("Ignoring edge {edge}: endpoint is not a declared discipline");
            }
        }
        UnknownEdgePolicy::Fail => {
            if let Some(edge) = graph.dropped.first() {
                return Err(CurriculumError::UnknownEndpoint {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Verify that `edges` over `nodes` form a DAG (Kahn's algorithm)
///
/// Edges touching ids outside `nodes` are ignored.
///
/// # Errors
/// Returns [`CurriculumError::Cycle`] with the sorted ids of the disciplines that
/// lie on a cycle.
pub fn check_acyclic<'a, I>(nodes: I, edges: &[Edge]) -> Result<()>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut indegree: BTreeMap<&str, usize> = nodes.into_iter().map(|id| (id.as_str(), 0)).collect();
    let mut outgoing: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for edge in edges {
        if !indegree.contains_key(edge.from.as_str()) {
            continue;
        }
        if let Some(count) = indegree.get_mut(edge.to.as_str()) {
            *count += 1;
            outgoing
                .entry(edge.from.as_str())
                .or_default()
                .push(edge.to.as_str());
        }
    }

    let mut queue: VecDeque<&str> = indegree
        .iter()
        .filter(|(_, count)| **count == 0)
        .map(|(&id, _)| id)
        .collect();

    while let Some(id) = queue.pop_front() {
        for &child in outgoing.get(id).map(Vec::as_slice).unwrap_or_default() {
            if let Some(count) = indegree.get_mut(child) {
                *count -= 1;
                if *count == 0 {
                    queue.push_back(child);
                }
            }
        }
    }

    let remaining: BTreeSet<&str> = indegree
        .into_iter()
        .filter(|&(_, count)| count > 0)
        .map(|(id, _)| id)
        .collect();

    if remaining.is_empty() {
        return Ok(());
    }

    // Kahn leaves everything downstream of a cycle too; keep only the members
    let members = remaining
        .iter()
        .filter(|&&id| reaches(id, id, &outgoing, &remaining))
        .map(|id| (*id).to_string())
        .collect();
    Err(CurriculumError::Cycle(members))
}

/// Whether `target` is reachable from `start` through at least one edge
fn reaches(
    start: &str,
    target: &str,
    outgoing: &BTreeMap<&str, Vec<&str>>,
    within: &BTreeSet<&str>,
) -> bool {
    let mut seen = BTreeSet::new();
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        for &child in outgoing.get(id).map(Vec::as_slice).unwrap_or_default() {
            if child == target {
                return true;
            }
            if within.contains(child) && seen.insert(child) {
                stack.push(child);
            }
        }
    }
    false
}

/// Edges whose prerequisite is scheduled in a later term than its dependent
#[must_use]
pub fn term_order_violations(catalog: &Catalog) -> Vec<&Edge> {
    catalog
        .edges
        .iter()
        .filter(|edge| match (catalog.get(&edge.from), catalog.get(&edge.to)) {
            (Some(from), Some(to)) => from.term > to.term,
            _ => false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extract::NodeInfo;
    use crate::core::models::{Category, Discipline, ProgramTitle};

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn graph_with_dropped() -> ExtractedGraph {
        let mut graph = ExtractedGraph::default();
        graph.nodes.insert(
            "A".to_string(),
            NodeInfo {
                label: "Algebra".to_string(),
                color: "#4A90E2".to_string(),
            },
        );
        graph.dropped.push(Edge::new("A", "Q"));
        graph
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("FAIL".parse::<UnknownEdgePolicy>(), Ok(UnknownEdgePolicy::Fail));
        assert_eq!(UnknownEdgePolicy::default(), UnknownEdgePolicy::Warn);
        assert!("ignore".parse::<UnknownEdgePolicy>().is_err());
        assert_eq!(UnknownEdgePolicy::Drop.to_string(), "drop");
    }

    #[test]
    fn test_fail_policy_rejects_dropped_edges() {
        let graph = graph_with_dropped();
        assert!(apply_policy(&graph, UnknownEdgePolicy::Drop).is_ok());
        assert!(apply_policy(&graph, UnknownEdgePolicy::Warn).is_ok());

        let err = apply_policy(&graph, UnknownEdgePolicy::Fail).unwrap_err();
        assert!(matches!(
            err,
            CurriculumError::UnknownEndpoint { ref from, ref to } if from == "A" && to == "Q"
        ));
    }

    #[test]
    fn test_fail_policy_accepts_clean_graph() {
        assert!(apply_policy(&ExtractedGraph::default(), UnknownEdgePolicy::Fail).is_ok());
    }

    #[test]
    fn test_acyclic_graph_passes() {
        let nodes = ids(&["A", "B", "C"]);
        let edges = vec![Edge::new("A", "B"), Edge::new("B", "C"), Edge::new("A", "C")];
        assert!(check_acyclic(&nodes, &edges).is_ok());
    }

    #[test]
    fn test_cycle_reported_with_members() {
        let nodes = ids(&["A", "B", "C", "D"]);
        let edges = vec![
            Edge::new("A", "B"),
            Edge::new("B", "C"),
            Edge::new("C", "B"),
            Edge::new("C", "D"),
        ];
        match check_acyclic(&nodes, &edges) {
            Err(CurriculumError::Cycle(members)) => assert_eq!(members, ids(&["B", "C"])),
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn test_nodes_between_cycles_not_reported() {
        // X <-> Y feeds M, which feeds P <-> Q
        let nodes = ids(&["M", "P", "Q", "X", "Y"]);
        let edges = vec![
            Edge::new("X", "Y"),
            Edge::new("Y", "X"),
            Edge::new("Y", "M"),
            Edge::new("M", "P"),
            Edge::new("P", "Q"),
            Edge::new("Q", "P"),
        ];
        match check_acyclic(&nodes, &edges) {
            Err(CurriculumError::Cycle(members)) => {
                assert_eq!(members, ids(&["P", "Q", "X", "Y"]));
            }
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let nodes = ids(&["A", "B"]);
        let edges = vec![Edge::new("A", "B"), Edge::new("B", "B")];
        match check_acyclic(&nodes, &edges) {
            Err(CurriculumError::Cycle(members)) => assert_eq!(members, ids(&["B"])),
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_endpoints_ignored_by_cycle_check() {
        let nodes = ids(&["A"]);
        let edges = vec![Edge::new("A", "Z"), Edge::new("Z", "A")];
        assert!(check_acyclic(&nodes, &edges).is_ok());
    }

    #[test]
    fn test_term_order_violations() {
        let catalog = Catalog {
            year: 2025,
            semesters: 8,
            program: ProgramTitle::default(),
            edges: vec![Edge::new("A", "B"), Edge::new("B", "C"), Edge::new("C", "C2")],
            disciplines: vec![
                Discipline::new("A", 1, Category::Math, "A"),
                Discipline::new("B", 3, Category::Math, "B"),
                Discipline::new("C", 2, Category::Math, "C"),
                Discipline::new("C2", 2, Category::Math, "C2"),
            ],
        };
        assert_eq!(term_order_violations(&catalog), vec![&Edge::new("B", "C")]);
    }
}
