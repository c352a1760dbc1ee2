//! JSON report: the requisite snapshot itself

use crate::core::error::Result;
use crate::core::report::{ReportContext, ReportGenerator};

/// JSON report generator
pub struct JsonReporter;

impl ReportGenerator for JsonReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String> {
        let mut json = ctx.requisites.to_json()?;
        json.push('\n');
        Ok(json)
    }
}
