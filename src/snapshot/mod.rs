//! Loading of allocation snapshot files written by the allocation collector.

pub mod entry;
pub mod parse;

pub use parse::load_snapshot_file;
