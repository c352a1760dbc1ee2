//! Curriculum table: disciplines and prerequisite edges for one intake year

use super::{Discipline, Edge, Language};
use crate::core::error::{CurriculumError, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Graphviz keywords that cannot be used as bare node ids
const DOT_KEYWORDS: [&str; 6] = ["node", "edge", "graph", "digraph", "subgraph", "strict"];

/// Whether `id` can be written unquoted as a DOT node id
#[must_use]
pub fn is_dot_identifier(id: &str) -> bool {
    let mut chars = id.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    starts_well
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !DOT_KEYWORDS.contains(&id.to_ascii_lowercase().as_str())
}

/// Localized title of the study program
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProgramTitle {
    /// Ukrainian title
    #[serde(default)]
    pub ua: String,
    /// English title
    #[serde(default)]
    pub en: String,
}

impl ProgramTitle {
    /// Title in `lang`
    #[must_use]
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::Ua => &self.ua,
            Language::En => &self.en,
        }
    }
}

const fn default_semesters() -> u8 {
    8
}

/// Discipline table and edge list of a curriculum
///
/// Loaded once from `curriculum_{year}.toml` and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    /// Intake year the table describes
    pub year: u16,

    /// Number of regular terms; disciplines in later terms form the capstone cluster
    #[serde(default = "default_semesters")]
    pub semesters: u8,

    /// Study program title
    #[serde(default)]
    pub program: ProgramTitle,

    /// Prerequisite edges in authoring order
    #[serde(default)]
    pub edges: Vec<Edge>,

    /// Disciplines in authoring order
    pub disciplines: Vec<Discipline>,
}

impl Catalog {
    /// Location of the table for `year` inside `data_dir`
    #[must_use]
    pub fn path_for(data_dir: &Path, year: u16) -> PathBuf {
        data_dir.join(format!("curriculum_{year}.toml"))
    }

    /// Parse a table from TOML text. `source` is only used in error messages.
    ///
    /// # Errors
    /// Returns [`CurriculumError::Catalog`] when the text is not valid TOML, does not
    /// match the schema, declares the same discipline id twice, uses an id that is
    /// not a plain DOT identifier, or leaves a discipline name blank.
    pub fn from_toml(text: &str, source: &Path) -> Result<Self> {
        let catalog: Self = toml::from_str(text).map_err(|e| CurriculumError::Catalog {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

        catalog.validate().map_err(|message| CurriculumError::Catalog {
            path: source.to_path_buf(),
            message,
        })?;

        Ok(catalog)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        let mut seen = HashSet::new();
        for discipline in &self.disciplines {
            let id = discipline.id.as_str();
            if !is_dot_identifier(id) {
                return Err(format!(
                    "discipline id '{id}' must be letters, digits and '_' and not a DOT keyword"
                ));
            }
            if !seen.insert(id) {
                return Err(format!("duplicate discipline id '{id}'"));
            }
            for lang in [Language::Ua, Language::En] {
                if discipline.label(lang).is_empty() {
                    return Err(format!("discipline '{id}' has no {lang} name"));
                }
            }
        }

        // Edge endpoints are written into the diagram too
        if let Some(edge) = self
            .edges
            .iter()
            .find(|e| !is_dot_identifier(&e.from) || !is_dot_identifier(&e.to))
        {
            return Err(format!("edge {edge} uses an id that is not a DOT identifier"));
        }
        Ok(())
    }

    /// Read and parse the table at `path`
    ///
    /// # Errors
    /// Returns [`CurriculumError::Io`] when the file cannot be read, otherwise the
    /// errors of [`Catalog::from_toml`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| CurriculumError::io(path, e))?;
        Self::from_toml(&text, path)
    }

    /// Look up a discipline by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Discipline> {
        self.disciplines.iter().find(|d| d.id == id)
    }

    /// Whether `id` names a discipline of this table
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Distinct term numbers in ascending order
    #[must_use]
    pub fn terms(&self) -> Vec<u8> {
        self.disciplines
            .iter()
            .map(|d| d.term)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Disciplines of `term`, sorted by id
    #[must_use]
    pub fn disciplines_in_term(&self, term: u8) -> Vec<&Discipline> {
        let mut in_term: Vec<&Discipline> =
            self.disciplines.iter().filter(|d| d.term == term).collect();
        in_term.sort_by(|a, b| a.id.cmp(&b.id));
        in_term
    }

    /// Map of discipline id to single-line label in `lang`
    #[must_use]
    pub fn node_labels(&self, lang: Language) -> BTreeMap<String, String> {
        self.disciplines
            .iter()
            .map(|d| (d.id.clone(), d.label(lang)))
            .collect()
    }

    /// Edges whose endpoints are not both declared disciplines
    #[must_use]
    pub fn unknown_edges(&self) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| !self.contains(&e.from) || !self.contains(&e.to))
            .collect()
    }
}
