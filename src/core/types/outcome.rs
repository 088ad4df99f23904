use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Result of running the test suite against one mutant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive)]
pub enum DetectionStatus {
    #[serde(alias = "Killed")]
    #[strum(to_string = "KILLED", serialize = "Killed")]
    Killed,
    #[serde(alias = "Survived")]
    #[strum(to_string = "SURVIVED", serialize = "Survived")]
    Survived,
    #[serde(alias = "TimedOut")]
    #[strum(to_string = "TIMED_OUT", serialize = "TimedOut")]
    TimedOut,
    #[serde(alias = "NonViable")]
    #[strum(to_string = "NON_VIABLE", serialize = "NonViable")]
    NonViable,
    #[serde(alias = "MemoryError")]
    #[strum(to_string = "MEMORY_ERROR", serialize = "MemoryError")]
    MemoryError,
    #[serde(alias = "RunError")]
    #[strum(to_string = "RUN_ERROR", serialize = "RunError")]
    RunError,
    #[serde(alias = "NotStarted")]
    #[strum(to_string = "NOT_STARTED", serialize = "NotStarted")]
    NotStarted,
    #[serde(alias = "Started")]
    #[strum(to_string = "STARTED", serialize = "Started")]
    Started,
    #[serde(alias = "NoCoverage")]
    #[strum(to_string = "NO_COVERAGE", serialize = "NoCoverage")]
    NoCoverage,
}

impl DetectionStatus {
    /// True when some test noticed the mutant (failed, hung, crashed or the
    /// mutant could not even be loaded).
    pub fn is_detected(&self) -> bool {
        matches!(
            self,
            DetectionStatus::Killed
                | DetectionStatus::TimedOut
                | DetectionStatus::NonViable
                | DetectionStatus::MemoryError
                | DetectionStatus::RunError
        )
    }

    /// True when no test executed the mutated code at all.
    pub fn is_no_coverage(&self) -> bool {
        *self == DetectionStatus::NoCoverage
    }

    /// Lowercase css class used by the html renderer
    pub fn css_class(&self) -> &'static str {
        if self.is_detected() {
            "killed"
        } else if self.is_no_coverage() {
            "uncovered"
        } else {
            "survived"
        }
    }
}

/// One mutant applied to one method, as reported by the execution engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationOutcome {
    pub class_name: String,
    pub method: String,
    /// Method descriptor, distinguishes overloads
    pub method_desc: String,
    pub mutator: String,
    /// 1-based source line
    pub line: u32,
    pub status: DetectionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub killing_test: Option<String>,
}

impl MutationOutcome {
    pub fn method_key(&self) -> MethodKey {
        MethodKey {
            class_name: self.class_name.clone(),
            method: self.method.clone(),
            method_desc: self.method_desc.clone(),
        }
    }

    /// Short mutator name, i.e. the last path segment of the mutator id
    pub fn mutator_name(&self) -> &str {
        self.mutator
            .rsplit(['.', ':'])
            .next()
            .unwrap_or(&self.mutator)
    }
}

/// Identity of a method including its overload descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodKey {
    pub class_name: String,
    pub method: String,
    pub method_desc: String,
}

impl std::fmt::Display for MethodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}{}", self.class_name, self.method, self.method_desc)
    }
}
