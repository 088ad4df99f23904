#![allow(dead_code)]

use mutlens::types::{ClassResultBatch, DetectionStatus, MutationOutcome};

/// Build an outcome for `class.method()V` on `line`
pub fn outcome(class: &str, method: &str, line: u32, status: DetectionStatus) -> MutationOutcome {
    MutationOutcome {
        class_name: class.to_string(),
        method: method.to_string(),
        method_desc: "()V".to_string(),
        mutator: "MATH".to_string(),
        line,
        status,
        description: None,
        killing_test: None,
    }
}

pub fn with_mutator(mut outcome: MutationOutcome, mutator: &str) -> MutationOutcome {
    outcome.mutator = mutator.to_string();
    outcome
}

/// Batch for `class`, whose source file is the simple class name plus `.java`
pub fn batch(class: &str, outcomes: Vec<MutationOutcome>) -> ClassResultBatch {
    let simple = class.rsplit('.').next().unwrap_or(class);
    ClassResultBatch::new(class, &format!("{simple}.java")).with_outcomes(outcomes)
}
