pub mod annotate;
pub mod html;
pub mod render;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local};
use log::{debug, error, info, warn};

use crate::core::listener::ResultListener;
use crate::core::locator::LocatorRegistry;
use crate::types::{
    ClassReportSummary, ClassResultBatch, ReportError, ReportResult, SourceLine, UnreportableRun,
};

pub use annotate::{annotate_lines, group_by_line};
pub use html::HtmlRenderer;
pub use render::{ClassReportView, IndexView, ReportRenderer, RunTotals, Template};

/// Name of the run index inside the run directory
pub const INDEX_FILE: &str = "index.html";

/// Timestamp naming each run directory, down to the millisecond
pub const RUN_DIR_FORMAT: &str = "%Y%m%d%H%M%S%3f";

/// Settings for one report run
#[derive(Debug, Clone)]
pub struct ReportSettings {
    /// Directory under which the run directory is created
    pub base_dir: PathBuf,
    /// Append a per-run timestamp directory to `base_dir`
    pub timestamped: bool,
    /// Mutators configured for the run; `None` lists each batch's own mutators
    pub mutators: Option<Vec<String>>,
}

impl ReportSettings {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            timestamped: true,
            mutators: None,
        }
    }
}

/// Renders one report per mutated class and an index at the end of the run.
pub struct ReportCompiler {
    run_dir: PathBuf,
    settings: ReportSettings,
    locators: LocatorRegistry,
    renderer: Arc<dyn ReportRenderer>,
    summaries: Mutex<Vec<ClassReportSummary>>,
    errors: Mutex<Vec<String>>,
    finished: AtomicBool,
}

// Lists behind these locks are append-only, poisoning loses nothing
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Create a fresh `<base>/<stamp>` directory, adding `-N` until the name is unused.
fn claim_run_dir(base: &Path, stamp: &str) -> ReportResult<PathBuf> {
    let mut attempt = 0u32;
    loop {
        let candidate = match attempt {
            0 => base.join(stamp),
            n => base.join(format!("{stamp}-{n}")),
        };
        match fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(source) => {
                return Err(ReportError::CreateDir {
                    path: candidate,
                    source,
                });
            }
        }
    }
}

impl ReportCompiler {
    /// Create the compiler and its run directory, timestamped with the current time
    pub fn new(
        settings: ReportSettings,
        locators: LocatorRegistry,
        renderer: Arc<dyn ReportRenderer>,
    ) -> ReportResult<Self> {
        Self::with_timestamp(settings, locators, renderer, Local::now())
    }

    pub fn with_timestamp(
        settings: ReportSettings,
        locators: LocatorRegistry,
        renderer: Arc<dyn ReportRenderer>,
        started: DateTime<Local>,
    ) -> ReportResult<Self> {
        fs::create_dir_all(&settings.base_dir).map_err(|source| ReportError::CreateDir {
            path: settings.base_dir.clone(),
            source,
        })?;
        let run_dir = if settings.timestamped {
            claim_run_dir(
                &settings.base_dir,
                &started.format(RUN_DIR_FORMAT).to_string(),
            )?
        } else {
            settings.base_dir.clone()
        };
        debug!("Writing reports to {}", run_dir.display());

        Ok(Self {
            run_dir,
            settings,
            locators,
            renderer,
            summaries: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
            finished: AtomicBool::new(false),
        })
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    /// Summaries recorded so far, in delivery order
    pub fn summaries(&self) -> Vec<ClassReportSummary> {
        lock(&self.summaries).clone()
    }

    /// Unreportable reasons recorded so far, in delivery order
    pub fn errors(&self) -> Vec<String> {
        lock(&self.errors).clone()
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    fn read_source(&self, batch: &ClassResultBatch) -> ReportResult<Vec<SourceLine>> {
        let classes = batch.class_names();
        match self.locators.locate(&classes, &batch.source_file) {
            Some(mut reader) => annotate_lines(&mut *reader, &batch.outcomes).map_err(|source| {
                ReportError::ReadSource {
                    file: batch.source_file.clone(),
                    source,
                }
            }),
            None => {
                debug!(
                    "No source found for {} ({})",
                    batch.source_file, batch.mutated_class
                );
                Ok(Vec::new())
            }
        }
    }

    /// Render and write the report for one class, then record its summary
    pub fn compile_class(&self, batch: &ClassResultBatch) -> ReportResult<ClassReportSummary> {
        let lines = self.read_source(batch)?;
        let mutations_by_line = group_by_line(&batch.outcomes);
        let summary = ClassReportSummary::from_batch(batch);
        let mutators = match &self.settings.mutators {
            Some(configured) => configured.clone(),
            None => batch.mutators(),
        };
        let mutated_classes = batch.class_names();

        let document = self.renderer.render_class(&ClassReportView {
            css: self.renderer.stylesheet(),
            summary: &summary,
            lines: &lines,
            mutations_by_line: &mutations_by_line,
            mutators: &mutators,
            mutated_classes: &mutated_classes,
        })?;

        let path = self.run_dir.join(&summary.file_name);
        fs::write(&path, document).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;
        debug!("Wrote {}", path.display());

        lock(&self.summaries).push(summary.clone());
        Ok(summary)
    }

    pub fn record_unreportable(&self, run: &UnreportableRun) {
        match &run.class_name {
            Some(class_name) => warn!("Could not report {}: {}", class_name, run.reason),
            None => warn!("Could not report class: {}", run.reason),
        }
        lock(&self.errors).push(run.reason.clone());
    }

    /// Write the run index. Runs at most once; the run counts as finished
    /// even when writing the index fails.
    pub fn finish(&self) -> ReportResult<PathBuf> {
        if self.finished.swap(true, Ordering::SeqCst) {
            return Err(ReportError::AlreadyFinished);
        }

        let summaries = self.summaries();
        let errors = self.errors();
        let document = self.renderer.render_index(&IndexView {
            css: self.renderer.stylesheet(),
            summaries: &summaries,
            errors: &errors,
            totals: RunTotals::from_summaries(&summaries),
        })?;

        let path = self.run_dir.join(INDEX_FILE);
        fs::write(&path, document).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

impl ResultListener for ReportCompiler {
    fn handle_class_result(&self, batch: &ClassResultBatch) {
        info!("Results for {}", batch.mutated_class);
        if let Err(e) = self.compile_class(batch) {
            error!("Failed to report {}: {e}", batch.mutated_class);
        }
    }

    fn handle_unreportable(&self, run: &UnreportableRun) {
        self.record_unreportable(run);
    }

    fn run_end(&self) {
        match self.finish() {
            Ok(path) => info!("Report written to {}", path.display()),
            Err(ReportError::AlreadyFinished) => warn!("Report run already finished"),
            Err(e) => error!("Failed to write report index: {e}"),
        }
    }
}
