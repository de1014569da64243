// src/fs/workdir.rs

//! Read/mutate entry points for the process-wide working directory.
//!
//! Changing it affects every unit in the process that has no explicit `cwd`.
//! Nothing here serialises concurrent changes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// The live working directory of this process, or `.` if it cannot be read
/// (e.g. it was deleted underneath us).
pub fn working_directory() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

pub fn set_working_directory(path: &Path) -> Result<()> {
    std::env::set_current_dir(path)
        .with_context(|| format!("changing working directory to {:?}", path))
}
