use serde::Serialize;

use crate::types::{ClassResultBatch, MutationOutcome, percentage};

/// One physical source line and the mutants placed on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLine {
    pub number: u32,
    pub text: String,
    pub mutations: Vec<MutationOutcome>,
}

impl SourceLine {
    pub fn is_mutated(&self) -> bool {
        !self.mutations.is_empty()
    }

    /// Css class for the line: `killed` when every mutant was detected,
    /// `uncovered` when none ran, `survived` otherwise. Empty if unmutated.
    pub fn css_class(&self) -> &'static str {
        if self.mutations.is_empty() {
            ""
        } else if self.mutations.iter().all(|m| m.status.is_detected()) {
            "killed"
        } else if self.mutations.iter().all(|m| m.status.is_no_coverage()) {
            "uncovered"
        } else {
            "survived"
        }
    }
}

/// Per-class row kept for the run index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassReportSummary {
    /// Name of the per-class report file inside the run directory
    pub file_name: String,
    pub package_name: String,
    pub mutated_class: String,
    pub source_file: String,
    pub total: usize,
    pub detected: usize,
    pub survived: usize,
    pub no_coverage: usize,
}

impl ClassReportSummary {
    pub fn from_batch(batch: &ClassResultBatch) -> Self {
        let mut summary = Self {
            file_name: format!("{}.html", batch.mutated_class),
            package_name: batch.package_name().to_string(),
            mutated_class: batch.mutated_class.clone(),
            source_file: batch.source_file.clone(),
            total: 0,
            detected: 0,
            survived: 0,
            no_coverage: 0,
        };
        for outcome in &batch.outcomes {
            summary.total += 1;
            if outcome.status.is_detected() {
                summary.detected += 1;
            } else if outcome.status.is_no_coverage() {
                summary.no_coverage += 1;
            } else {
                summary.survived += 1;
            }
        }
        summary
    }

    pub fn mutation_score(&self) -> u32 {
        percentage(self.detected, self.total)
    }
}
