use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::types::{AppResult, EngineEvent};

/// Expand input arguments into files. Existing paths are taken as-is,
/// anything else is treated as a glob pattern.
pub fn resolve_inputs(patterns: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = PathBuf::from(pattern);
        if path.is_file() {
            files.push(path);
            continue;
        }
        match glob::glob(pattern) {
            Ok(paths) => {
                let before = files.len();
                files.extend(paths.filter_map(Result::ok).filter(|p| p.is_file()));
                if files.len() == before {
                    warn!("No result files match {pattern}");
                }
            }
            Err(e) => warn!("Invalid input pattern {pattern}: {e}"),
        }
    }
    files
}

/// Parse engine events from JSON Lines. Blank lines are skipped and
/// malformed lines are reported and skipped.
pub fn read_events<R: BufRead>(reader: R, origin: &str) -> io::Result<Vec<EngineEvent>> {
    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<EngineEvent>(trimmed) {
            Ok(event) => events.push(event),
            Err(e) => warn!("Skipping malformed event at {}:{}: {e}", origin, idx + 1),
        }
    }
    Ok(events)
}

pub fn read_events_file(path: &Path) -> AppResult<Vec<EngineEvent>> {
    let file = File::open(path)?;
    let events = read_events(BufReader::new(file), &path.display().to_string())?;
    debug!("Read {} events from {}", events.len(), path.display());
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn malformed_and_blank_lines_are_skipped() {
        let input = r#"
{"kind":"unreportable","reason":"first"}
not json

{"kind":"class_result","mutated_class":"a.A","source_file":"A.java"}
{"kind":"mystery"}
"#;
        let events = read_events(Cursor::new(input), "test").unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], EngineEvent::Unreportable(_)));
        assert!(matches!(events[1], EngineEvent::ClassResult(_)));
    }

    #[test]
    fn inputs_expand_globs() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.jsonl"), "").unwrap();
        std::fs::write(dir.path().join("b.jsonl"), "").unwrap();
        std::fs::write(dir.path().join("c.txt"), "").unwrap();

        let pattern = dir.path().join("*.jsonl").display().to_string();
        let mut files = resolve_inputs(&[pattern]);
        files.sort();
        assert_eq!(
            files,
            vec![dir.path().join("a.jsonl"), dir.path().join("b.jsonl")]
        );

        let direct = dir.path().join("c.txt").display().to_string();
        assert_eq!(resolve_inputs(&[direct]).len(), 1);
    }
}
