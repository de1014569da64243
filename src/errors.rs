// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Running a unit never returns one of these directly: `run()` folds faults
//! into [`crate::result::CmdResult::error`]. The `Result` alias is used by the
//! fallible plumbing around it (sequence files, CLI wiring).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmdError {
    /// The child process could not be started at all (not found, not
    /// executable, bad working directory, ...).
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The child was started but waiting for its exit status failed.
    #[error("failed waiting for '{program}' to exit: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    /// A task draining one of the child's output streams died, so part of
    /// the output may be missing.
    #[error("output drain for '{program}' failed: {source}")]
    Drain {
        program: String,
        #[source]
        source: tokio::task::JoinError,
    },

    /// A builtin file-system operation (read, write, canonicalize, chdir) failed.
    #[error("{op} {}: {source:#}", .path.display())]
    FileSystem {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// A caller-supplied synthetic unit reported failure.
    #[error("{0:#}")]
    Unit(anyhow::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CmdError {
    pub fn file_system(op: &'static str, path: impl Into<PathBuf>, source: anyhow::Error) -> Self {
        CmdError::FileSystem {
            op,
            path: path.into(),
            source,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, CmdError>;
