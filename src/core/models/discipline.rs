//! Discipline and prerequisite edge models

use super::Language;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discipline category, used for diagram colors and edge grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Mathematics
    Math,
    /// Physics
    Physics,
    /// Programming and computational methods
    #[serde(alias = "comp")]
    Computational,
    /// Elective slot
    Elective,
    /// Practice, coursework and thesis
    #[serde(alias = "pract")]
    Practicum,
    /// General education (languages, economics, ...)
    General,
}

impl Category {
    /// Order in which edge groups are written to the diagram
    pub const EDGE_GROUP_ORDER: [Self; 6] = [
        Self::Math,
        Self::Physics,
        Self::Computational,
        Self::General,
        Self::Practicum,
        Self::Elective,
    ];

    /// Fill color of a node of this category
    #[must_use]
    pub const fn node_color(self) -> &'static str {
        match self {
            Self::Math => "#4A90E2",
            Self::Physics => "#E85D75",
            Self::Computational => "#7ED321",
            Self::Elective => "#F5A623",
            Self::Practicum => "#D4A5FF",
            Self::General => "#B8B8B8",
        }
    }

    /// Color of the edges leaving a node of this category
    #[must_use]
    pub const fn edge_color(self) -> &'static str {
        match self {
            Self::Math => "#4A90E2",
            Self::Physics => "#E85D75",
            Self::Computational => "#7ED321",
            Self::General => "#B8B8B8",
            Self::Practicum => "#9013FE",
            Self::Elective => "#666666",
        }
    }

    /// Caption of the edge group comment in the diagram
    #[must_use]
    pub const fn group_title(self, lang: Language) -> &'static str {
        match (self, lang) {
            (Self::Math, Language::Ua) => "ПРЕРЕКВІЗИТИ — Математика",
            (Self::Physics, Language::Ua) => "ПРЕРЕКВІЗИТИ — Фізика",
            (Self::Computational, Language::Ua) => "ПРЕРЕКВІЗИТИ — Програмування та обчислення",
            (Self::General, Language::Ua) => "ПРЕРЕКВІЗИТИ — Загальна підготовка",
            (Self::Practicum, Language::Ua) => "ПРЕРЕКВІЗИТИ — Практика та дослідження",
            (Self::Elective, Language::Ua) => "ПРЕРЕКВІЗИТИ — Вибіркові дисципліни",
            (Self::Math, Language::En) => "PREREQUISITES — Mathematics",
            (Self::Physics, Language::En) => "PREREQUISITES — Physics",
            (Self::Computational, Language::En) => "PREREQUISITES — Programming and Computing",
            (Self::General, Language::En) => "PREREQUISITES — General Education",
            (Self::Practicum, Language::En) => "PREREQUISITES — Practice and Research",
            (Self::Elective, Language::En) => "PREREQUISITES — Electives",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Math => "math",
            Self::Physics => "physics",
            Self::Computational => "computational",
            Self::Elective => "elective",
            Self::Practicum => "practicum",
            Self::General => "general",
        };
        f.write_str(name)
    }
}

/// A discipline of the curriculum table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discipline {
    /// Short identifier (e.g., "S1_MatAn")
    pub id: String,

    /// Academic term (semester) number
    pub term: u8,

    /// Category tag
    pub category: Category,

    /// Ukrainian name; may contain line breaks for the diagram layout
    pub ua: String,

    /// English name; may contain line breaks for the diagram layout
    pub en: String,
}

impl Discipline {
    /// Create a discipline with the same name in both languages
    #[must_use]
    pub fn new(id: &str, term: u8, category: Category, name: &str) -> Self {
        Self {
            id: id.to_string(),
            term,
            category,
            ua: name.to_string(),
            en: name.to_string(),
        }
    }

    /// Raw name in `lang`, line breaks included
    #[must_use]
    pub fn name(&self, lang: Language) -> &str {
        match lang {
            Language::Ua => &self.ua,
            Language::En => &self.en,
        }
    }

    /// Single-line display label in `lang`
    #[must_use]
    pub fn label(&self, lang: Language) -> String {
        plain_label(self.name(lang))
    }
}

/// Collapse line breaks and runs of whitespace into single spaces
#[must_use]
pub fn plain_label(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Directed prerequisite edge: `from` must be completed before `to`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Edge {
    /// Prerequisite discipline id
    pub from: String,
    /// Dependent discipline id
    pub to: String,
}

impl Edge {
    /// Create an edge from prerequisite `from` to dependent `to`
    #[must_use]
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

impl From<(String, String)> for Edge {
    fn from((from, to): (String, String)) -> Self {
        Self { from, to }
    }
}

impl From<Edge> for (String, String) {
    fn from(edge: Edge) -> Self {
        (edge.from, edge.to)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_label() {
        assert_eq!(plain_label("Fundamentals\n of Economics"), "Fundamentals of Economics");
        assert_eq!(plain_label("  Mechanics "), "Mechanics");
    }

    #[test]
    fn test_discipline_names() {
        let disc = Discipline {
            id: "S2_Thermo".to_string(),
            term: 2,
            category: Category::Physics,
            ua: "Термодинаміка\n та молекулярна фізика".to_string(),
            en: "Thermodynamics\n and Molecular Physics".to_string(),
        };

        assert_eq!(disc.name(Language::En), "Thermodynamics\n and Molecular Physics");
        assert_eq!(disc.label(Language::En), "Thermodynamics and Molecular Physics");
        assert_eq!(disc.label(Language::Ua), "Термодинаміка та молекулярна фізика");
    }

    #[test]
    fn test_category_aliases() {
        #[derive(Deserialize)]
        struct Row {
            category: Category,
        }

        let row: Row = toml::from_str("category = \"comp\"").unwrap();
        assert_eq!(row.category, Category::Computational);
        let row: Row = toml::from_str("category = \"pract\"").unwrap();
        assert_eq!(row.category, Category::Practicum);
        let row: Row = toml::from_str("category = \"practicum\"").unwrap();
        assert_eq!(row.category, Category::Practicum);
    }

    #[test]
    fn test_category_colors() {
        assert_eq!(Category::Practicum.node_color(), "#D4A5FF");
        assert_eq!(Category::Practicum.edge_color(), "#9013FE");
        assert_eq!(Category::Elective.edge_color(), "#666666");
    }

    #[test]
    fn test_edge_from_pair() {
        let edge: Edge = ("S1_Alg".to_string(), "S2_Alg".to_string()).into();
        assert_eq!(edge, Edge::new("S1_Alg", "S2_Alg"));
        assert_eq!(edge.to_string(), "S1_Alg -> S2_Alg");
    }
}
