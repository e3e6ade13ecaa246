use crate::snapshot::entry::{Entry, SnapshotFile, TypeEntry};
use crate::table::{Row, TableError};
use anyhow::Context;
use regex::Regex;
use std::fs;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot {snapshot}: cannot parse key {key:?} (expected \"Type (size:N, alignment:A)\")")]
    BadFlatKey { snapshot: usize, key: String },

    #[error("snapshot file contains no snapshots")]
    Empty,

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Load an allocation snapshot JSON file and flatten it into table rows.
pub fn load_snapshot_file(path: &str) -> anyhow::Result<Vec<Row>> {
    let text = fs::read_to_string(path).with_context(|| format!("read snapshot file {}", path))?;
    let rows = parse_snapshots(&text).with_context(|| format!("parse snapshot file {}", path))?;
    log::info!("loaded {} rows from {}", rows.len(), path);
    Ok(rows)
}

/// Flatten snapshot JSON into rows ordered by snapshot, then type, alignment, size.
pub fn parse_snapshots(text: &str) -> anyhow::Result<Vec<Row>> {
    let file: SnapshotFile = serde_json::from_str(text)?;
    if file.iter().all(Option::is_none) {
        return Err(SnapshotError::Empty.into());
    }

    // Flat keys look like: "std::string (size:32, alignment:8)"
    let key_re = Regex::new(r#"^(.*) \(size:(\d+), alignment:(\d+)\)$"#)?;

    let mut rows = Vec::new();
    for (index, snapshot) in file.into_iter().enumerate() {
        let Some(snapshot) = snapshot else {
            log::warn!("snapshot {} is null; skipping", index);
            continue;
        };

        for (key, entry) in snapshot {
            match entry {
                TypeEntry::Flat(entry) => {
                    let caps = key_re.captures(&key).ok_or_else(|| SnapshotError::BadFlatKey {
                        snapshot: index,
                        key: key.clone(),
                    })?;
                    rows.push(make_row(index, &caps[1], &caps[3], &caps[2], &entry)?);
                }
                TypeEntry::Nested(alignments) => {
                    for (alignment, sizes) in alignments {
                        for (size, entry) in sizes {
                            rows.push(make_row(index, &key, &alignment, &size, &entry)?);
                        }
                    }
                }
            }
        }
    }

    Ok(rows)
}

fn make_row(
    snapshot: usize,
    type_name: &str,
    alignment: &str,
    size: &str,
    entry: &Entry,
) -> Result<Row, SnapshotError> {
    Ok(Row::from_cells(vec![
        snapshot.to_string(),
        type_name.to_string(),
        alignment.to_string(),
        size.to_string(),
        entry.current.to_string(),
        entry.peak.to_string(),
        entry.function.clone(),
    ])?)
}
