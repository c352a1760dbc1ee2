//! HTML report generator
//!
//! Renders a self-contained page (embedded CSS and JavaScript) with one table row
//! per discipline and a search box filtering the rows on the client.

use crate::core::error::Result;
use crate::core::report::{ReportContext, ReportGenerator, ReportStrings};
use crate::core::requisites::PrerequisiteRecord;
use askama::Template;

/// One table row of the page
struct Row<'a> {
    id: &'a str,
    record: &'a PrerequisiteRecord,
}

#[derive(Template)]
#[template(path = "requisites.html")]
struct RequisitesPage<'a> {
    lang: &'a str,
    year: u16,
    program: &'a str,
    links: usize,
    strings: &'a ReportStrings,
    rows: Vec<Row<'a>>,
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String> {
        let page = RequisitesPage {
            lang: ctx.language.html_lang(),
            year: ctx.year,
            program: ctx.program,
            links: ctx.summary().links,
            strings: ctx.strings(),
            rows: ctx
                .requisites
                .iter()
                .map(|(id, record)| Row { id, record })
                .collect(),
        };
        Ok(page.render()?)
    }
}
