use std::collections::BTreeMap;
use std::io::{self, BufRead};

use crate::types::{MutationOutcome, SourceLine};

/// Pair every physical line of `reader` with the outcomes recorded on it.
///
/// Lines are numbered from 1. Bytes that are not valid UTF-8 are replaced
/// rather than rejected. Outcomes pointing past the end of the file are not
/// attached to any line.
pub fn annotate_lines<R: BufRead + ?Sized>(
    reader: &mut R,
    outcomes: &[MutationOutcome],
) -> io::Result<Vec<SourceLine>> {
    let by_line = group_by_line(outcomes);
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    let mut number: u32 = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        number += 1;
        let text = String::from_utf8_lossy(&buf)
            .trim_end_matches(['\n', '\r'])
            .to_string();
        lines.push(SourceLine {
            number,
            text,
            mutations: by_line.get(&number).cloned().unwrap_or_default(),
        });
    }

    Ok(lines)
}

/// Outcomes keyed by line number; only lines that carry mutants appear.
pub fn group_by_line(outcomes: &[MutationOutcome]) -> BTreeMap<u32, Vec<MutationOutcome>> {
    let mut grouped: BTreeMap<u32, Vec<MutationOutcome>> = BTreeMap::new();
    for outcome in outcomes {
        grouped.entry(outcome.line).or_default().push(outcome.clone());
    }
    grouped
}
