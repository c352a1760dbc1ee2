//! Direct prerequisite/postrequisite derivation
//!
//! For every discipline the derived record lists the labels of the disciplines
//! one edge away: incoming edges give prerequisites, outgoing edges give
//! postrequisites. Multi-hop chains are not followed.

use crate::core::error::{CurriculumError, Result};
use crate::core::models::{Edge, Language};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Derived requisites of one discipline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisiteRecord {
    /// Display name of the discipline
    pub name: String,
    /// Labels of the direct prerequisites, sorted
    pub prerequisites: Vec<String>,
    /// Labels of the direct postrequisites, sorted
    pub postrequisites: Vec<String>,
}

/// Requisite records keyed by discipline id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequisiteMap {
    records: BTreeMap<String, PrerequisiteRecord>,
}

/// Counts shown in summaries and report headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequisiteSummary {
    /// Number of disciplines
    pub disciplines: usize,
    /// Number of prerequisite links
    pub links: usize,
    /// Disciplines without prerequisites, sorted by id
    pub roots: Vec<String>,
    /// Disciplines without postrequisites, sorted by id
    pub leaves: Vec<String>,
}

/// File name of the requisite snapshot for an intake year and language
#[must_use]
pub fn snapshot_file_name(year: u16, lang: Language) -> String {
    format!("prerequisites_{year}_{lang}.json")
}

/// Derive the requisite records of every node
///
/// `labels` maps discipline id to display label. Edges with an endpoint missing
/// from `labels` are ignored.
#[must_use]
pub fn derive(labels: &BTreeMap<String, String>, edges: &[Edge]) -> RequisiteMap {
    let mut records: BTreeMap<String, PrerequisiteRecord> = labels
        .iter()
        .map(|(id, label)| {
            (
                id.clone(),
                PrerequisiteRecord {
                    name: label.clone(),
                    ..PrerequisiteRecord::default()
                },
            )
        })
        .collect();

    for edge in edges {
        let (Some(from_label), Some(to_label)) = (labels.get(&edge.from), labels.get(&edge.to))
        else {
            continue;
        };

        if let Some(record) = records.get_mut(&edge.to) {
            record.prerequisites.push(from_label.clone());
        }
        if let Some(record) = records.get_mut(&edge.from) {
            record.postrequisites.push(to_label.clone());
        }
    }

    for record in records.values_mut() {
        record.prerequisites.sort();
        record.postrequisites.sort();
    }

    RequisiteMap { records }
}

impl RequisiteMap {
    /// Record of discipline `id`
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PrerequisiteRecord> {
        self.records.get(id)
    }

    /// Records in id order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PrerequisiteRecord)> {
        self.records.iter()
    }

    /// Number of disciplines
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no disciplines
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Counts of disciplines, links, roots and leaves
    #[must_use]
    pub fn summary(&self) -> RequisiteSummary {
        let pick = |f: fn(&PrerequisiteRecord) -> bool| -> Vec<String> {
            self.records
                .iter()
                .filter(|(_, r)| f(r))
                .map(|(id, _)| id.clone())
                .collect()
        };

        RequisiteSummary {
            disciplines: self.records.len(),
            links: self.records.values().map(|r| r.prerequisites.len()).sum(),
            roots: pick(|r| r.prerequisites.is_empty()),
            leaves: pick(|r| r.postrequisites.is_empty()),
        }
    }

    /// Serialize as pretty-printed JSON
    ///
    /// # Errors
    /// Returns [`CurriculumError::Snapshot`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a JSON snapshot
    ///
    /// # Errors
    /// Returns [`CurriculumError::Snapshot`] on malformed input.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Write the snapshot to `path`
    ///
    /// # Errors
    /// Returns [`CurriculumError::Io`] when the file cannot be written.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let mut json = self.to_json()?;
        json.push('\n');
        fs::write(path, json).map_err(|e| CurriculumError::io(path, e))
    }

    /// Read a snapshot from `path`
    ///
    /// # Errors
    /// Returns [`CurriculumError::Io`] when the file cannot be read and
    /// [`CurriculumError::Snapshot`] when it is not a valid snapshot.
    pub fn load_json(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| CurriculumError::io(path, e))?;
        Self::from_json(&text)
    }
}

impl FromIterator<(String, PrerequisiteRecord)> for RequisiteMap {
    fn from_iter<I: IntoIterator<Item = (String, PrerequisiteRecord)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
