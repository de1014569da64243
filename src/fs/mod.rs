// src/fs/mod.rs

//! File-system collaborator used by the builtin file units.
//!
//! The builtins talk to a [`FileSystem`] rather than `std::fs` directly, so
//! tests can hand them a [`mock::MockFileSystem`]. The process-wide working
//! directory lives in [`workdir`]; it is genuinely global state and is not
//! part of the trait.

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod mock;
pub mod workdir;

pub use workdir::{set_working_directory, working_directory};

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write `contents` to `path`, replacing any existing file. Parent
    /// directories are not created.
    fn write_string(&self, path: &Path, contents: &str) -> Result<()>;

    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))
    }

    fn write_string(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).with_context(|| format!("writing file {:?}", path))
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        fs::canonicalize(path).with_context(|| format!("canonicalizing {:?}", path))
    }
}
