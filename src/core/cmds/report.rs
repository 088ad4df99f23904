use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use log::{info, warn};

use crate::core::aggregator::ResultAggregator;
use crate::core::cli::ReportArgs;
use crate::core::cmds::stats::print_statistics;
use crate::core::ingest::resolve_inputs;
use crate::core::listener::ListenerSet;
use crate::core::locator::LocatorRegistry;
use crate::core::pipeline::{default_jobs, run_pipeline};
use crate::core::report::{HtmlRenderer, ReportCompiler, ReportSettings};
use crate::types::AppResult;
use crate::types::config::config;

pub async fn execute_report(args: ReportArgs, running: Arc<AtomicBool>) -> AppResult<()> {
    let inputs = resolve_inputs(&args.inputs);
    if inputs.is_empty() {
        warn!("No result files found; the report will be empty");
    }

    let report_config = config().report();
    let settings = ReportSettings {
        base_dir: PathBuf::from(report_config.dir()),
        timestamped: report_config.timestamped(),
        mutators: config().mutators().map(|m| m.to_vec()),
    };
    let locators = LocatorRegistry::from_roots(&config().source_roots());

    let aggregator = Arc::new(ResultAggregator::new());
    let compiler = Arc::new(ReportCompiler::new(
        settings,
        locators,
        Arc::new(HtmlRenderer::new()),
    )?);
    info!("Writing reports to {}", compiler.run_dir().display());

    let mut listeners = ListenerSet::new();
    listeners.register(aggregator.clone());
    listeners.register(compiler.clone());

    let jobs = args.jobs.unwrap_or_else(default_jobs);
    let delivered = run_pipeline(Arc::new(listeners), &inputs, jobs, running).await?;
    info!(
        "Processed {} results ({} classes reported, {} unreportable)",
        delivered,
        compiler.summaries().len(),
        compiler.errors().len()
    );
    info!("");

    let stats = aggregator.compute_statistics()?;
    print_statistics(&stats, &args.format)
}
