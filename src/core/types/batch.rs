use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::MutationOutcome;

/// All outcomes for one mutated class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassResultBatch {
    pub mutated_class: String,
    pub source_file: String,
    /// Every class compiled from `source_file` (inner classes, secondary
    /// top-level classes). Falls back to the mutated class when empty.
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub outcomes: Vec<MutationOutcome>,
}

impl ClassResultBatch {
    pub fn new(mutated_class: &str, source_file: &str) -> Self {
        Self {
            mutated_class: mutated_class.to_string(),
            source_file: source_file.to_string(),
            classes: vec![mutated_class.to_string()],
            outcomes: Vec::new(),
        }
    }

    pub fn with_outcomes(mut self, outcomes: Vec<MutationOutcome>) -> Self {
        self.outcomes = outcomes;
        self
    }

    /// Candidate class names used for source lookup
    pub fn class_names(&self) -> Vec<String> {
        if self.classes.is_empty() {
            vec![self.mutated_class.clone()]
        } else {
            self.classes.clone()
        }
    }

    /// Package of the mutated class, empty for the default package
    pub fn package_name(&self) -> &str {
        package_of(&self.mutated_class)
    }

    /// Sorted distinct mutator ids seen in this batch
    pub fn mutators(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .map(|o| o.mutator.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Package portion of a dotted class name.
pub fn package_of(class_name: &str) -> &str {
    match class_name.rfind('.') {
        Some(idx) => &class_name[..idx],
        None => "",
    }
}

/// A class the engine could not turn into mutation results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreportableRun {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub reason: String,
}

/// One message from the execution engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineEvent {
    ClassResult(ClassResultBatch),
    Unreportable(UnreportableRun),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_of_handles_default_package() {
        assert_eq!(package_of("com.example.Foo"), "com.example");
        assert_eq!(package_of("Foo"), "");
    }

    #[test]
    fn engine_event_is_internally_tagged() {
        let line = r#"{"kind":"unreportable","class_name":"com.example.Broken","reason":"boom"}"#;
        let event: EngineEvent = serde_json::from_str(line).unwrap();
        assert_eq!(
            event,
            EngineEvent::Unreportable(UnreportableRun {
                class_name: Some("com.example.Broken".to_string()),
                reason: "boom".to_string(),
            })
        );

        let line = r#"{"kind":"class_result","mutated_class":"a.B","source_file":"B.java"}"#;
        let EngineEvent::ClassResult(batch) = serde_json::from_str::<EngineEvent>(line).unwrap() else {
            panic!("expected class result");
        };
        assert!(batch.outcomes.is_empty());
        assert_eq!(batch.class_names(), vec!["a.B".to_string()]);
    }
}
