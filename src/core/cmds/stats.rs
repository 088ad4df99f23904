use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use log::info;
use strum::IntoEnumIterator;

use crate::core::aggregator::ResultAggregator;
use crate::core::cli::StatsArgs;
use crate::core::ingest::resolve_inputs;
use crate::core::listener::ListenerSet;
use crate::core::pipeline::{default_jobs, run_pipeline};
use crate::types::{AppResult, MethodClassification, RunStatistics};

pub async fn execute_stats(args: StatsArgs, running: Arc<AtomicBool>) -> AppResult<()> {
    let inputs = resolve_inputs(&args.inputs);
    let aggregator = Arc::new(ResultAggregator::new());

    let mut listeners = ListenerSet::new();
    listeners.register(aggregator.clone());
    run_pipeline(Arc::new(listeners), &inputs, default_jobs(), running).await?;

    let stats = aggregator.compute_statistics()?;
    print_statistics(&stats, &args.format)
}

pub fn print_statistics(stats: &RunStatistics, format: &str) -> AppResult<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(stats)?);
        }
        _ => print_table_format(stats),
    }
    Ok(())
}

fn print_table_format(stats: &RunStatistics) {
    info!("Mutation Statistics");
    info!("===================");
    info!(
        "Generated {} mutations, killed {} ({}%)",
        stats.total_mutations(),
        stats.total_detected(),
        stats.percentage_detected()
    );

    info!("");
    info!("Mutators:");
    if stats.mutator_scores.is_empty() {
        info!("  No mutations found");
    }
    for (mutator, score) in &stats.mutator_scores {
        info!(
            "  {}: {} / {} detected ({}%)",
            mutator,
            score.detected,
            score.total,
            score.percentage_detected()
        );
        let breakdown = score
            .by_status
            .iter()
            .map(|(status, count)| format!("{status} {count}"))
            .collect::<Vec<_>>()
            .join(", ");
        info!("    {breakdown}");
    }

    info!("");
    info!("Methods ({} total):", stats.method_counts.total());
    for classification in MethodClassification::iter() {
        info!(
            "  {:<17} {}",
            classification.to_string(),
            stats.method_counts.get(classification)
        );
    }
}
