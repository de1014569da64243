// src/cmd/builtin/mod.rs

//! Units that run inside this process instead of spawning one.
//!
//! Each pushes `RUNNING:` and then `SUCCEEDED:` or `FAILED:` info events, exits
//! `0` or `1`, and routes its text through [`crate::cmd::print`].

use std::path::PathBuf;

use crate::cmd::Runnable;
use crate::result::CmdResult;

pub mod cd;
pub mod read_file;
pub mod write_file;

pub use cd::CmdCd;
pub use read_file::CmdReadTextFile;
pub use write_file::CmdWriteTextFile;

/// Change the process working directory.
pub async fn cd(path: impl Into<PathBuf>) -> CmdResult {
    CmdCd::new(path).run().await
}

/// Read a UTF-8 text file into the result's stdout.
pub async fn read_text_file(path: impl Into<PathBuf>) -> CmdResult {
    CmdReadTextFile::new(path).run().await
}

/// Write UTF-8 text to a file, replacing its contents.
pub async fn write_text_file(path: impl Into<PathBuf>, text: impl Into<String>) -> CmdResult {
    CmdWriteTextFile::new(path, text).run().await
}
