use std::collections::BTreeMap;

use serde::Serialize;
use strum::{Display, IntoStaticStr};

use crate::types::{ClassReportSummary, MutationOutcome, RenderError, SourceLine, percentage};

/// The two report templates a renderer must provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum Template {
    #[strum(serialize = "class-report")]
    ClassReport,
    #[strum(serialize = "index")]
    Index,
}

/// Everything the per-class template needs
#[derive(Debug, Clone, Serialize)]
pub struct ClassReportView<'a> {
    pub css: &'a str,
    pub summary: &'a ClassReportSummary,
    pub lines: &'a [SourceLine],
    pub mutations_by_line: &'a BTreeMap<u32, Vec<MutationOutcome>>,
    pub mutators: &'a [String],
    pub mutated_classes: &'a [String],
}

/// Everything the run index template needs
#[derive(Debug, Clone, Serialize)]
pub struct IndexView<'a> {
    pub css: &'a str,
    pub summaries: &'a [ClassReportSummary],
    pub errors: &'a [String],
    pub totals: RunTotals,
}

/// Totals over every class summary of the run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunTotals {
    pub classes: usize,
    pub mutations: usize,
    pub detected: usize,
}

impl RunTotals {
    pub fn from_summaries(summaries: &[ClassReportSummary]) -> Self {
        summaries.iter().fold(Self::default(), |mut totals, s| {
            totals.classes += 1;
            totals.mutations += s.total;
            totals.detected += s.detected;
            totals
        })
    }

    pub fn mutation_score(&self) -> u32 {
        percentage(self.detected, self.mutations)
    }
}

/// Turns report views into document text
pub trait ReportRenderer: Send + Sync {
    /// Stylesheet shared by every document of a run
    fn stylesheet(&self) -> &str {
        ""
    }

    fn render_class(&self, view: &ClassReportView<'_>) -> Result<String, RenderError>;

    fn render_index(&self, view: &IndexView<'_>) -> Result<String, RenderError>;
}

impl Template {
    pub fn render_error(self, reason: impl Into<String>) -> RenderError {
        RenderError::Failed {
            template: self.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(total: usize, detected: usize) -> ClassReportSummary {
        ClassReportSummary {
            file_name: "a.A.html".to_string(),
            package_name: "a".to_string(),
            mutated_class: "a.A".to_string(),
            source_file: "A.java".to_string(),
            total,
            detected,
            survived: total - detected,
            no_coverage: 0,
        }
    }

    #[test]
    fn totals_fold_summaries() {
        let totals = RunTotals::from_summaries(&[summary(4, 3), summary(6, 3)]);
        assert_eq!(
            totals,
            RunTotals {
                classes: 2,
                mutations: 10,
                detected: 6
            }
        );
        assert_eq!(totals.mutation_score(), 60);
        assert_eq!(RunTotals::from_summaries(&[]).mutation_score(), 0);
    }

    #[test]
    fn template_names() {
        assert_eq!(Template::ClassReport.to_string(), "class-report");
        let name: &'static str = Template::Index.into();
        assert_eq!(name, "index");
        assert_eq!(
            Template::Index.render_error("boom").to_string(),
            "failed to render index: boom"
        );
    }
}
