use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use log::debug;

use crate::core::listener::ResultListener;
use crate::types::{
    ClassResultBatch, MethodClassification, MethodKey, MutationOutcome, RunStatistics,
    StatisticsError, StatisticsResult,
};

/// Accumulates every class batch of a run and derives statistics on demand.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    history: Mutex<Vec<ClassResultBatch>>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    // The history is append-only, so a poisoned lock still holds whole batches
    fn history(&self) -> MutexGuard<'_, Vec<ClassResultBatch>> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record_batch(&self, batch: ClassResultBatch) {
        self.history().push(batch);
    }

    /// Number of batches recorded so far
    pub fn batch_count(&self) -> usize {
        self.history().len()
    }

    /// Rebuild statistics from a snapshot of everything recorded so far
    pub fn compute_statistics(&self) -> StatisticsResult<RunStatistics> {
        let history = self.history();
        let mut stats = RunStatistics::default();

        for outcome in history.iter().flat_map(|b| b.outcomes.iter()) {
            stats
                .mutator_scores
                .entry(outcome.mutator.clone())
                .or_default()
                .record(outcome.status);
        }

        for (key, outcomes) in group_by_method(&history) {
            let classification = classify_method(&key, &outcomes)?;
            stats.method_counts.record(classification);
            stats.methods.insert(key, classification);
        }

        debug!(
            "Computed statistics over {} batches, {} methods",
            history.len(),
            stats.methods.len()
        );
        Ok(stats)
    }
}

impl ResultListener for ResultAggregator {
    fn handle_class_result(&self, batch: &ClassResultBatch) {
        self.record_batch(batch.clone());
    }
}

fn group_by_method(history: &[ClassResultBatch]) -> BTreeMap<MethodKey, Vec<&MutationOutcome>> {
    let mut methods: BTreeMap<MethodKey, Vec<&MutationOutcome>> = BTreeMap::new();
    for outcome in history.iter().flat_map(|b| b.outcomes.iter()) {
        methods.entry(outcome.method_key()).or_default().push(outcome);
    }
    methods
}

/// Classify one method from the outcomes of all mutants placed in it.
///
/// Uncovered and covered mutants never mix for one method under the mutant
/// generators this tool supports, so a mix is reported as an error rather
/// than resolved.
pub fn classify_method(
    key: &MethodKey,
    outcomes: &[&MutationOutcome],
) -> StatisticsResult<MethodClassification> {
    let mut detected = 0;
    let mut no_coverage = 0;
    let mut undetected = 0;
    for outcome in outcomes {
        if outcome.status.is_detected() {
            detected += 1;
        } else if outcome.status.is_no_coverage() {
            no_coverage += 1;
        } else {
            undetected += 1;
        }
    }

    if no_coverage > 0 {
        if detected + undetected > 0 {
            return Err(StatisticsError::MixedCoverage {
                method: key.clone(),
                no_coverage,
                covered: detected + undetected,
            });
        }
        return Ok(MethodClassification::NotCovered);
    }

    match (detected, undetected) {
        (0, 0) => Err(StatisticsError::EmptyMethod(key.clone())),
        (_, 0) => Ok(MethodClassification::Tested),
        (0, _) => Ok(MethodClassification::PseudoTested),
        _ => Ok(MethodClassification::PartiallyTested),
    }
}
