use std::collections::BTreeMap;

use serde::Serialize;
use strum::{Display, EnumIter};

use crate::types::{DetectionStatus, MethodKey};

/// How well a method's mutants were detected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MethodClassification {
    Tested,
    NotCovered,
    PseudoTested,
    PartiallyTested,
}

/// Detection scoreboard for a single mutator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MutatorScore {
    pub detected: usize,
    pub total: usize,
    /// Map from status to number of outcomes with that status
    pub by_status: BTreeMap<DetectionStatus, usize>,
}

impl MutatorScore {
    pub fn record(&mut self, status: DetectionStatus) {
        self.total += 1;
        if status.is_detected() {
            self.detected += 1;
        }
        *self.by_status.entry(status).or_insert(0) += 1;
    }

    pub fn percentage_detected(&self) -> u32 {
        percentage(self.detected, self.total)
    }
}

/// Number of methods per classification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MethodCounts {
    pub tested: usize,
    pub not_covered: usize,
    pub pseudo_tested: usize,
    pub partially_tested: usize,
}

impl MethodCounts {
    pub fn record(&mut self, classification: MethodClassification) {
        match classification {
            MethodClassification::Tested => self.tested += 1,
            MethodClassification::NotCovered => self.not_covered += 1,
            MethodClassification::PseudoTested => self.pseudo_tested += 1,
            MethodClassification::PartiallyTested => self.partially_tested += 1,
        }
    }

    pub fn get(&self, classification: MethodClassification) -> usize {
        match classification {
            MethodClassification::Tested => self.tested,
            MethodClassification::NotCovered => self.not_covered,
            MethodClassification::PseudoTested => self.pseudo_tested,
            MethodClassification::PartiallyTested => self.partially_tested,
        }
    }

    pub fn total(&self) -> usize {
        self.tested + self.not_covered + self.pseudo_tested + self.partially_tested
    }
}

/// Run-wide statistics, rebuilt from the full outcome history on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStatistics {
    /// Map from mutator id to its scoreboard
    pub mutator_scores: BTreeMap<String, MutatorScore>,
    pub method_counts: MethodCounts,
    #[serde(serialize_with = "serialize_classifications")]
    pub methods: BTreeMap<MethodKey, MethodClassification>,
}

fn serialize_classifications<S>(
    methods: &BTreeMap<MethodKey, MethodClassification>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_map(methods.iter().map(|(k, v)| (k.to_string(), v)))
}

impl RunStatistics {
    pub fn total_mutations(&self) -> usize {
        self.mutator_scores.values().map(|s| s.total).sum()
    }

    pub fn total_detected(&self) -> usize {
        self.mutator_scores.values().map(|s| s.detected).sum()
    }

    pub fn percentage_detected(&self) -> u32 {
        percentage(self.total_detected(), self.total_mutations())
    }

    pub fn classification_of(&self, key: &MethodKey) -> Option<MethodClassification> {
        self.methods.get(key).copied()
    }
}

/// Rounded integer percentage, 0 for an empty denominator
pub fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        ((part as f64 / total as f64) * 100.0).round() as u32
    }
}
