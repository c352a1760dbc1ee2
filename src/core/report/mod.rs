//! Report generation for derived requisites
//!
//! Renders the requisite map of one curriculum as a searchable HTML page, a
//! Markdown table or the JSON snapshot. All user-facing text is localized in
//! Ukrainian or English.

pub mod formats;

use crate::core::error::{CurriculumError, Result};
use crate::core::models::Language;
use crate::core::requisites::{RequisiteMap, RequisiteSummary};
use std::fs;
use std::path::Path;

pub use formats::{reporter_for, HtmlReporter, JsonReporter, MarkdownReporter, ReportFormat};

/// File name of the report for an intake year, language and format
#[must_use]
pub fn report_file_name(year: u16, lang: Language, format: ReportFormat) -> String {
    format!("requisites_bachelor_{year}_{lang}.{}", format.extension())
}

/// Localized text used by the reporters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportStrings {
    /// Page title and main heading
    pub title: &'static str,
    /// Placeholder of the search box
    pub search_placeholder: &'static str,
    /// Label of the total counter
    pub total: &'static str,
    /// Label of the visible counter
    pub shown: &'static str,
    /// Discipline column heading
    pub discipline: &'static str,
    /// Prerequisites column heading
    pub prerequisites: &'static str,
    /// Postrequisites column heading
    pub postrequisites: &'static str,
    /// Placeholder for an empty prerequisite list
    pub no_prerequisites: &'static str,
    /// Placeholder for an empty postrequisite list
    pub no_postrequisites: &'static str,
    /// Label of the link counter
    pub links: &'static str,
    /// Label of the intake year
    pub year: &'static str,
}

const UA_STRINGS: ReportStrings = ReportStrings {
    title: "Пререквізити навчального плану",
    search_placeholder: "Пошук дисципліни...",
    total: "Всього дисциплін",
    shown: "Показано",
    discipline: "Дисципліна",
    prerequisites: "Пререквізити",
    postrequisites: "Постреквізити",
    no_prerequisites: "Немає пререквізитів",
    no_postrequisites: "Немає постреквізитів",
    links: "Зв'язків",
    year: "Рік вступу",
};

const EN_STRINGS: ReportStrings = ReportStrings {
    title: "Curriculum Prerequisites",
    search_placeholder: "Search disciplines...",
    total: "Total disciplines",
    shown: "Shown",
    discipline: "Discipline",
    prerequisites: "Prerequisites",
    postrequisites: "Postrequisites",
    no_prerequisites: "No prerequisites",
    no_postrequisites: "No postrequisites",
    links: "Links",
    year: "Intake year",
};

impl ReportStrings {
    /// Strings for `lang`
    #[must_use]
    pub const fn for_language(lang: Language) -> &'static Self {
        match lang {
            Language::Ua => &UA_STRINGS,
            Language::En => &EN_STRINGS,
        }
    }
}

/// Data context for report generation
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// Intake year
    pub year: u16,
    /// Report language
    pub language: Language,
    /// Study program title in `language` (may be empty)
    pub program: &'a str,
    /// Derived requisites
    pub requisites: &'a RequisiteMap,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(
        year: u16,
        language: Language,
        program: &'a str,
        requisites: &'a RequisiteMap,
    ) -> Self {
        Self {
            year,
            language,
            program,
            requisites,
        }
    }

    /// Localized strings
    #[must_use]
    pub const fn strings(&self) -> &'static ReportStrings {
        ReportStrings::for_language(self.language)
    }

    /// Counts for the report header
    #[must_use]
    pub fn summary(&self) -> RequisiteSummary {
        self.requisites.summary()
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render the report and write it to `output_path`
    ///
    /// # Errors
    /// Returns an error if rendering fails or the file cannot be written
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<()> {
        let content = self.render(ctx)?;
        fs::write(output_path, content).map_err(|e| CurriculumError::io(output_path, e))
    }

    /// Render the report content as a string
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, ctx: &ReportContext) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_file_name() {
        assert_eq!(
            report_file_name(2025, Language::Ua, ReportFormat::Html),
            "requisites_bachelor_2025_ua.html"
        );
        assert_eq!(
            report_file_name(2024, Language::En, ReportFormat::Markdown),
            "requisites_bachelor_2024_en.md"
        );
    }

    #[test]
    fn test_strings_are_localized() {
        assert_eq!(ReportStrings::for_language(Language::En).discipline, "Discipline");
        assert_eq!(ReportStrings::for_language(Language::Ua).shown, "Показано");
    }
}
