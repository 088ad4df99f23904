use std::path::PathBuf;

use thiserror::Error;

use crate::types::MethodKey;

#[derive(Debug, Error)]
pub enum StatisticsError {
    #[error(
        "method {method} mixes {no_coverage} uncovered mutants with {covered} covered mutants"
    )]
    MixedCoverage {
        method: MethodKey,
        no_coverage: usize,
        covered: usize,
    },
    #[error("method {0} has no mutation outcomes")]
    EmptyMethod(MethodKey),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to render {template}: {reason}")]
    Failed {
        template: &'static str,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create report directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read source {file}: {source}")]
    ReadSource {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("report run already finished")]
    AlreadyFinished,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Statistics error: {0}")]
    Statistics(#[from] StatisticsError),
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
    #[error("Task error: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("{0}")]
    Custom(String),
}

pub type StatisticsResult<T> = Result<T, StatisticsError>;
pub type ReportResult<T> = Result<T, ReportError>;
pub type AppResult<T> = Result<T, AppError>;
