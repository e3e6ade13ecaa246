use serde::Deserialize;
use std::collections::BTreeMap;

/// Counters recorded for one allocation site in one snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    pub current: u64,
    pub peak: u64,
    #[serde(default)]
    pub function: String,
}

/// Value stored under a top-level key of a snapshot object.
///
/// Flat: `"Foo (size:8, alignment:8)": { "current": 1, "peak": 2 }`
/// Nested: `"Foo": { "<alignment>": { "<size>": { "function": .., "current": .., "peak": .. } } }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TypeEntry {
    Flat(Entry),
    Nested(BTreeMap<String, BTreeMap<String, Entry>>),
}

/// One snapshot: type key -> counters.
pub type Snapshot = BTreeMap<String, TypeEntry>;

/// Whole file; index is the snapshot number. The collector may write `null`
/// for a snapshot taken before anything was allocated.
pub type SnapshotFile = Vec<Option<Snapshot>>;
