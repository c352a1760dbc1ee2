//! Error type shared by the library modules

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a curriculum run.
#[derive(Error, Debug)]
pub enum CurriculumError {
    /// A file could not be read or written.
    #[error("{}: {source}", path.display())]
    Io {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The curriculum table is malformed.
    #[error("invalid curriculum {}: {message}", path.display())]
    Catalog {
        /// Source of the table
        path: PathBuf,
        /// What is wrong with it
        message: String,
    },

    /// The requisite snapshot could not be (de)serialized.
    #[error("requisite snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// An edge names a discipline that is not in the graph.
    #[error("edge {from} -> {to} references an unknown discipline")]
    UnknownEndpoint {
        /// Prerequisite side of the edge
        from: String,
        /// Dependent side of the edge
        to: String,
    },

    /// The requisite graph is not acyclic.
    #[error("cycle detected among disciplines: {}", .0.join(", "))]
    Cycle(Vec<String>),

    /// The report template failed to render.
    #[error("report template error: {0}")]
    Template(#[from] askama::Error),

    /// Graphviz rendering failed.
    #[error("diagram rendering failed: {0}")]
    Render(String),

    /// An unsupported value was supplied for a setting.
    #[error("{0}")]
    InvalidValue(String),
}

impl CurriculumError {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means the input file does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, CurriculumError>;
