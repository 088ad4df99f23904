mod common;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use common::{batch, outcome};
use mutlens::core::ingest::resolve_inputs;
use mutlens::core::pipeline::run_pipeline;
use mutlens::core::report::INDEX_FILE;
use mutlens::types::DetectionStatus::*;
use mutlens::types::{EngineEvent, UnreportableRun};
use mutlens::{
    HtmlRenderer, ListenerSet, LocatorRegistry, ReportCompiler, ReportSettings, ResultAggregator,
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn write_events(path: &PathBuf, events: &[EngineEvent]) {
    let text: String = events
        .iter()
        .map(|e| serde_json::to_string(e).unwrap() + "\n")
        .collect();
    fs::write(path, text).unwrap();
}

fn sample_events() -> Vec<EngineEvent> {
    vec![
        EngineEvent::ClassResult(batch(
            "com.example.A",
            vec![
                outcome("com.example.A", "m", 1, Killed),
                outcome("com.example.A", "m", 2, Survived),
            ],
        )),
        EngineEvent::ClassResult(batch(
            "com.example.B",
            vec![outcome("com.example.B", "n", 1, NoCoverage)],
        )),
        EngineEvent::Unreportable(UnreportableRun {
            class_name: Some("com.example.C".to_string()),
            reason: "could not load com.example.C".to_string(),
        }),
    ]
}

async fn run(
    jobs: usize,
    inputs: &[PathBuf],
    out: &Path,
) -> (Arc<ResultAggregator>, Arc<ReportCompiler>) {
    let mut settings = ReportSettings::new(out);
    settings.timestamped = false;
    let aggregator = Arc::new(ResultAggregator::new());
    let compiler = Arc::new(
        ReportCompiler::new(settings, LocatorRegistry::new(), Arc::new(HtmlRenderer::new()))
            .unwrap(),
    );
    let mut listeners = ListenerSet::new();
    listeners.register(aggregator.clone());
    listeners.register(compiler.clone());

    let delivered = run_pipeline(
        Arc::new(listeners),
        inputs,
        jobs,
        Arc::new(AtomicBool::new(true)),
    )
    .await
    .unwrap();
    assert_eq!(delivered, 3);
    (aggregator, compiler)
}

#[tokio::test]
async fn test_pipeline_feeds_both_components() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("results.jsonl");
    write_events(&input, &sample_events());
    let out = dir.path().join("reports");

    let (aggregator, compiler) = run(1, &[input], &out).await;

    let stats = aggregator.compute_statistics().unwrap();
    assert_eq!(stats.total_mutations(), 3);
    assert_eq!(stats.method_counts.partially_tested, 1);
    assert_eq!(stats.method_counts.not_covered, 1);

    let classes: Vec<String> = compiler
        .summaries()
        .into_iter()
        .map(|s| s.mutated_class)
        .collect();
    assert_eq!(classes, vec!["com.example.A", "com.example.B"]);
    assert_eq!(compiler.errors(), vec!["could not load com.example.C"]);
    assert!(compiler.is_finished());
    assert!(out.join(INDEX_FILE).exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_delivery_matches_sequential() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("results.jsonl");
    write_events(&input, &sample_events());

    let (sequential, _) = run(1, &[input.clone()], &dir.path().join("seq")).await;
    let (parallel, compiler) = run(8, &[input], &dir.path().join("par")).await;

    assert_eq!(
        parallel.compute_statistics().unwrap(),
        sequential.compute_statistics().unwrap()
    );
    assert_eq!(compiler.summaries().len(), 2);
}

#[tokio::test]
async fn test_interrupted_run_still_ends() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("results.jsonl");
    write_events(&input, &sample_events());

    let mut settings = ReportSettings::new(dir.path().join("reports"));
    settings.timestamped = false;
    let compiler = Arc::new(
        ReportCompiler::new(settings, LocatorRegistry::new(), Arc::new(HtmlRenderer::new()))
            .unwrap(),
    );
    let mut listeners = ListenerSet::new();
    listeners.register(compiler.clone());

    let delivered = run_pipeline(
        Arc::new(listeners),
        &[input],
        2,
        Arc::new(AtomicBool::new(false)),
    )
    .await
    .unwrap();

    assert_eq!(delivered, 0);
    assert!(compiler.is_finished());
    assert!(compiler.run_dir().join(INDEX_FILE).exists());
}

#[test]
fn test_glob_inputs_are_resolved() {
    let dir = tempdir().unwrap();
    write_events(&dir.path().join("one.jsonl"), &sample_events());
    write_events(&dir.path().join("two.jsonl"), &sample_events());
    let pattern = dir.path().join("*.jsonl").display().to_string();
    assert_eq!(resolve_inputs(&[pattern]).len(), 2);
}
