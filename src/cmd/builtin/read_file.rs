// src/cmd/builtin/read_file.rs

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cmd::{BoxFuture, CmdOpts, Runnable};
use crate::errors::CmdError;
use crate::fs::{FileSystem, RealFileSystem};
use crate::result::{CmdResult, StreamKind};

/// Read a UTF-8 text file; its contents become the result's stdout.
#[derive(Debug, Clone)]
pub struct CmdReadTextFile {
    path: PathBuf,
    opts: CmdOpts,
    fs: Arc<dyn FileSystem>,
}

impl CmdReadTextFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            opts: CmdOpts::with_args(vec![path.display().to_string()]),
            path,
            fs: Arc::new(RealFileSystem),
        }
    }

    /// Use `fs` instead of the real file system.
    pub fn with_fs(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read(&self) -> CmdResult {
        let description = self.description();
        let mut draft = self.opts.draft(description.clone());
        draft.parsed_args = self.opts.parsed_args();
        draft.info(format!("RUNNING: {description}"));

        let read = self.fs.read_to_string(&self.path).and_then(|text| {
            let canonical = self.fs.canonicalize(&self.path)?;
            Ok((text, canonical))
        });

        match read {
            Ok((text, canonical)) => {
                debug!(path = %canonical.display(), bytes = text.len(), "read text file");
                draft.parsed_args = vec![canonical.display().to_string()];
                self.opts.print(StreamKind::Stdout, &mut draft, &text);
                draft.info(format!("SUCCEEDED: {description}"));
                draft.succeed();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %format!("{e:#}"), "read failed");
                draft.info(format!("FAILED: {description}"));
                self.opts.print(
                    StreamKind::Stderr,
                    &mut draft,
                    &format!("Error reading from {}: {e:#}", self.path.display()),
                );
                draft.fail(1, Some(CmdError::file_system("read", &self.path, e)));
            }
        }

        draft.finalize()
    }
}

impl Runnable for CmdReadTextFile {
    fn description(&self) -> String {
        format!("READ TEXT FILE: {}", self.path.display())
    }

    fn opts(&self) -> &CmdOpts {
        &self.opts
    }

    fn opts_mut(&mut self) -> &mut CmdOpts {
        &mut self.opts
    }

    fn run(&mut self) -> BoxFuture<'_, CmdResult> {
        Box::pin(async move { self.read() })
    }
}
