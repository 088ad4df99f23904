use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::core::ingest::read_events_file;
use crate::core::listener::ListenerSet;
use crate::types::{AppError, AppResult};

/// Default number of parallel deliveries
pub fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Feed every event from `inputs` to `listeners`, at most `jobs` at a time.
///
/// Deliveries run on the blocking pool since listeners do file I/O. All of
/// them are joined before `run_end`, which is called even when the run is
/// interrupted. Returns the number of events delivered.
pub async fn run_pipeline(
    listeners: Arc<ListenerSet>,
    inputs: &[PathBuf],
    jobs: usize,
    running: Arc<AtomicBool>,
) -> AppResult<usize> {
    let mut events = Vec::new();
    for input in inputs {
        events.extend(read_events_file(input)?);
    }
    debug!("Delivering {} events with {} jobs", events.len(), jobs);

    let progress = ProgressBar::new(events.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} classes")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    listeners.run_start();

    let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
    let mut tasks = JoinSet::new();
    let mut delivered = 0;
    for event in events {
        if !running.load(Ordering::SeqCst) {
            warn!("Interrupted, no further results will be processed");
            break;
        }
        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .map_err(|e| AppError::Custom(e.to_string()))?;
        let listeners = Arc::clone(&listeners);
        let progress = progress.clone();
        tasks.spawn_blocking(move || {
            listeners.dispatch(&event);
            progress.inc(1);
            drop(permit);
        });
        delivered += 1;
    }

    let mut join_error = None;
    while let Some(result) = tasks.join_next().await {
        if let Err(e) = result {
            if join_error.is_none() {
                join_error = Some(e);
            }
        }
    }
    progress.finish_and_clear();

    listeners.run_end();

    match join_error {
        Some(e) => Err(e.into()),
        None => Ok(delivered),
    }
}
