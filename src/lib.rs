//! Curriculum requisite graph toolkit
//!
//! Turns a curriculum table (disciplines + prerequisite edges) into a Graphviz
//! diagram, recovers the graph from that diagram, derives every discipline's
//! direct prerequisites and postrequisites, and renders a review report.

pub mod config;
pub mod core;

pub use crate::core::error::{CurriculumError, Result};

/// Returns the current version of the `curriculum-graph` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
