// src/cmd/builtin/write_file.rs

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::cmd::{BoxFuture, CmdOpts, Runnable};
use crate::errors::CmdError;
use crate::fs::{FileSystem, RealFileSystem};
use crate::result::{CmdResult, StreamKind};

/// Write UTF-8 text to a file, creating or truncating it.
///
/// On success stdout holds `Wrote <n> characters to <canonical path>`.
#[derive(Debug, Clone)]
pub struct CmdWriteTextFile {
    path: PathBuf,
    text: String,
    opts: CmdOpts,
    fs: Arc<dyn FileSystem>,
}

impl CmdWriteTextFile {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            opts: CmdOpts::with_args(vec![path.display().to_string()]),
            path,
            text: text.into(),
            fs: Arc::new(RealFileSystem),
        }
    }

    pub fn with_fs(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn write(&self) -> CmdResult {
        let description = self.description();
        let mut draft = self.opts.draft(description.clone());
        draft.parsed_args = self.opts.parsed_args();
        draft.info(format!("RUNNING: {description}"));

        let written = self
            .fs
            .write_string(&self.path, &self.text)
            .and_then(|()| self.fs.canonicalize(&self.path));

        match written {
            Ok(canonical) => {
                let chars = self.text.chars().count();
                info!(path = %canonical.display(), chars, "wrote text file");
                draft.parsed_args = vec![canonical.display().to_string()];
                draft.info(format!("SUCCEEDED: {description}"));
                self.opts.print(
                    StreamKind::Stdout,
                    &mut draft,
                    &format!("Wrote {chars} characters to {}", canonical.display()),
                );
                draft.succeed();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %format!("{e:#}"), "write failed");
                draft.info(format!("FAILED: {description}"));
                self.opts.print(
                    StreamKind::Stderr,
                    &mut draft,
                    &format!("Error writing to {}: {e:#}", self.path.display()),
                );
                draft.fail(1, Some(CmdError::file_system("write", &self.path, e)));
            }
        }

        draft.finalize()
    }
}

impl Runnable for CmdWriteTextFile {
    fn description(&self) -> String {
        format!("WRITE TEXT FILE: {}", self.path.display())
    }

    fn opts(&self) -> &CmdOpts {
        &self.opts
    }

    fn opts_mut(&mut self) -> &mut CmdOpts {
        &mut self.opts
    }

    fn run(&mut self) -> BoxFuture<'_, CmdResult> {
        Box::pin(async move { self.write() })
    }
}
