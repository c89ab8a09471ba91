//! Deterministic per-table file paths. All four are functions of the data
//! directory and the table name alone.

use std::path::{Path, PathBuf};

pub fn data_file(dir: &Path, table: &str) -> PathBuf {
    dir.join(format!("table_{}", table))
}

pub fn schema_file(dir: &Path, table: &str) -> PathBuf {
    dir.join(format!("table_{}_sql", table))
}

pub fn pk_file(dir: &Path, table: &str) -> PathBuf {
    dir.join(format!("table_{}_pk", table))
}

pub fn manifest_file(dir: &Path) -> PathBuf {
    dir.join(".table")
}
