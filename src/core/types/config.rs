use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Source roots searched when no roots are configured, in lookup order
pub const DEFAULT_SOURCE_ROOTS: &[&str] = &[
    "src/test/java",
    "src/main/java",
    "src",
    "test",
    "source",
    "tst",
    "java",
];

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LogConfig {
    pub level: Option<String>,
    pub color: Option<bool>, // None = auto-detect (semantic)
}

impl LogConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn color(&self) -> Option<bool> {
        self.color // None has semantic meaning (auto-detect)
    }

    pub fn to_effective(&self) -> Self {
        Self {
            level: Some(self.level().to_string()),
            color: self.color,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ReportConfig {
    pub dir: Option<String>,
    pub timestamped: Option<bool>,
}

impl ReportConfig {
    pub fn dir(&self) -> &str {
        self.dir.as_deref().unwrap_or("mutation-reports")
    }

    pub fn timestamped(&self) -> bool {
        self.timestamped.unwrap_or(true)
    }

    pub fn to_effective(&self) -> Self {
        Self {
            dir: Some(self.dir().to_string()),
            timestamped: Some(self.timestamped()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SourceConfig {
    pub roots: Option<Vec<String>>, // ordered, first match wins
}

impl SourceConfig {
    pub fn roots(&self) -> Vec<String> {
        match &self.roots {
            Some(roots) => roots.clone(),
            None => DEFAULT_SOURCE_ROOTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn to_effective(&self) -> Self {
        Self {
            roots: Some(self.roots()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    // Top-level fields
    pub mutators: Option<Vec<String>>, // None = derive from each batch (semantic)

    // Nested sections
    pub log: Option<LogConfig>,
    pub report: Option<ReportConfig>,
    pub source: Option<SourceConfig>,
}

impl Config {
    pub fn mutators(&self) -> Option<&[String]> {
        self.mutators.as_deref()
    }

    pub fn log(&self) -> LogConfig {
        self.log.clone().unwrap_or_default()
    }

    pub fn report(&self) -> ReportConfig {
        self.report.clone().unwrap_or_default()
    }

    pub fn source(&self) -> SourceConfig {
        self.source.clone().unwrap_or_default()
    }

    pub fn source_roots(&self) -> Vec<PathBuf> {
        self.source().roots().into_iter().map(PathBuf::from).collect()
    }

    pub fn to_effective(&self) -> Self {
        Self {
            mutators: self.mutators.clone(),
            log: Some(self.log().to_effective()),
            report: Some(self.report().to_effective()),
            source: Some(self.source().to_effective()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub log_color: Option<String>, // "on" | "off"
    pub report_dir: Option<String>,
    pub source_roots: Option<Vec<String>>,
    pub mutators: Option<String>, // csv
}

static CONFIG: OnceCell<Config> = OnceCell::new();

pub fn get_config_filename() -> &'static str {
    "mutlens.toml"
}

pub fn config() -> &'static Config {
    CONFIG.get_or_init(|| {
        let mut cfg = Config::default();
        // Apply nearest config file found by walking up from cwd
        if let Some(path) = find_nearest_config_file() {
            if let Some(file_cfg) = read_config_file(&path) {
                apply_file_config(&mut cfg, &file_cfg);
            }
        }
        cfg
    })
}

pub fn init_with_overrides(overrides: &CliOverrides) {
    let mut cfg = Config::default();

    // 1) Config file: walk up from cwd and use the first config file found
    if let Some(path) = find_nearest_config_file() {
        if let Some(file_cfg) = read_config_file(&path) {
            apply_file_config(&mut cfg, &file_cfg);
        }
    }

    // 2) CLI arguments (highest priority). Only override if user specified.
    apply_cli_overrides(&mut cfg, overrides);

    let _ = CONFIG.set(cfg);
}

fn read_config_file(path: &Path) -> Option<Config> {
    match fs::read_to_string(path) {
        Ok(contents) => toml::from_str::<Config>(&contents).ok(),
        Err(_) => None,
    }
}

fn apply_file_config(cfg: &mut Config, file: &Config) {
    if file.mutators.is_some() {
        cfg.mutators = file.mutators.clone(); // override semantics
    }

    // Merge log section
    if let Some(file_log) = &file.log {
        let mut log = cfg.log.clone().unwrap_or_default();
        if file_log.level.is_some() {
            log.level = file_log.level.clone();
        }
        if file_log.color.is_some() {
            log.color = file_log.color;
        }
        cfg.log = Some(log);
    }

    // Merge report section
    if let Some(file_report) = &file.report {
        let mut report = cfg.report.clone().unwrap_or_default();
        if file_report.dir.is_some() {
            report.dir = file_report.dir.clone();
        }
        if file_report.timestamped.is_some() {
            report.timestamped = file_report.timestamped;
        }
        cfg.report = Some(report);
    }

    // Source roots replace rather than extend, order matters for lookup
    if let Some(file_source) = &file.source {
        if file_source.roots.is_some() {
            cfg.source = Some(file_source.clone());
        }
    }
}

fn apply_cli_overrides(cfg: &mut Config, overrides: &CliOverrides) {
    if let Some(muts_csv) = &overrides.mutators {
        let list = parse_csv(muts_csv);
        if !list.is_empty() {
            cfg.mutators = Some(list);
        }
    }

    // Log overrides
    let mut log = cfg.log.clone().unwrap_or_default();
    if let Some(level) = &overrides.log_level
        && !level.trim().is_empty()
    {
        log.level = Some(level.trim().to_string());
    }
    if let Some(color_str) = &overrides.log_color {
        match color_str.to_lowercase().as_str() {
            "on" => log.color = Some(true),
            "off" => log.color = Some(false),
            _ => {}
        }
    }
    if overrides.log_level.is_some() || overrides.log_color.is_some() {
        cfg.log = Some(log);
    }

    // Report overrides
    if let Some(dir) = &overrides.report_dir
        && !dir.trim().is_empty()
    {
        let mut report = cfg.report.clone().unwrap_or_default();
        report.dir = Some(dir.clone());
        cfg.report = Some(report);
    }

    // Source overrides
    if let Some(roots) = &overrides.source_roots
        && !roots.is_empty()
    {
        cfg.source = Some(SourceConfig {
            roots: Some(roots.clone()),
        });
    }
}

fn parse_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn find_nearest_config_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    config_file_above(&cwd)
}

/// First config file found in `start` or any of its ancestors
pub fn config_file_above(start: &Path) -> Option<PathBuf> {
    let config_filename = get_config_filename();
    for dir in start.ancestors() {
        let candidate = dir.join(config_filename);
        if candidate.exists() {
            return Some(candidate);
        }
    }
    None
}

pub fn colors_enabled() -> bool {
    match config().log().color() {
        Some(force) => force,
        None => console::colors_enabled(),
    }
}
