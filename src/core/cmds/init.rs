use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::types::config::{Config, config_file_above, get_config_filename};
use crate::types::{AppError, AppResult};

const STARTER_CONFIG: &str = include_str!("../../../example.toml");

pub async fn execute_init() -> AppResult<()> {
    let cwd = std::env::current_dir()?;
    write_starter_config(&cwd)?;
    Ok(())
}

/// Seed a config file in `dir`. Returns `None` when one is already there.
pub fn write_starter_config(dir: &Path) -> AppResult<Option<PathBuf>> {
    let cfg_path = dir.join(get_config_filename());
    if cfg_path.exists() {
        warn!("{} already exists; leaving it unchanged", cfg_path.display());
        return Ok(None);
    }
    if let Some(outer) = dir.parent().and_then(config_file_above) {
        info!(
            "{} will shadow {} for runs started below {}",
            cfg_path.display(),
            outer.display(),
            dir.display()
        );
    }

    let seeded: Config =
        toml::from_str(STARTER_CONFIG).map_err(|e| AppError::Custom(e.to_string()))?;
    fs::write(&cfg_path, STARTER_CONFIG)?;

    let report = seeded.report();
    let roots = seeded
        .source_roots()
        .iter()
        .map(|r| r.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    info!("Created {}", cfg_path.display());
    info!(
        "  [report] dir = {}, timestamped = {}",
        report.dir(),
        report.timestamped()
    );
    info!("  [source] roots = {roots}");

    Ok(Some(cfg_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn seeds_config_once() {
        let dir = tempdir().unwrap();
        let path = write_starter_config(dir.path()).unwrap().unwrap();
        assert_eq!(path, dir.path().join("mutlens.toml"));
        assert_eq!(fs::read_to_string(&path).unwrap(), STARTER_CONFIG);

        fs::write(&path, "mutators = [\"MATH\"]\n").unwrap();
        assert!(write_starter_config(dir.path()).unwrap().is_none());
        assert_eq!(fs::read_to_string(&path).unwrap(), "mutators = [\"MATH\"]\n");
    }

    #[test]
    fn nested_project_gets_its_own_file() {
        let outer = tempdir().unwrap();
        fs::write(outer.path().join("mutlens.toml"), "").unwrap();
        let inner = outer.path().join("module");
        fs::create_dir(&inner).unwrap();

        let path = write_starter_config(&inner).unwrap().unwrap();
        assert_eq!(config_file_above(&inner), Some(path));
    }

    #[test]
    fn starter_config_matches_defaults() {
        let seeded: Config = toml::from_str(STARTER_CONFIG).unwrap();
        assert_eq!(seeded.report().dir(), "mutation-reports");
        assert!(seeded.report().timestamped());
        assert!(seeded.mutators().is_none());
        assert_eq!(
            seeded.source_roots(),
            vec![
                PathBuf::from("src/main/java"),
                PathBuf::from("src/test/java"),
                PathBuf::from("src"),
            ]
        );
    }
}
