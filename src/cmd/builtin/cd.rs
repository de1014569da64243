// src/cmd/builtin/cd.rs

use std::path::PathBuf;

use tracing::{info, warn};

use crate::cmd::{BoxFuture, CmdOpts, Runnable};
use crate::errors::CmdError;
use crate::fs::{set_working_directory, FileSystem, RealFileSystem};
use crate::result::{CmdResult, StreamKind};

/// Change the process-wide working directory.
///
/// On success stdout holds the canonical absolute path of the new directory.
/// Relative paths resolve against the working directory at run time, so two
/// relative `CmdCd`s in a row compose like `cd a; cd b`.
#[derive(Debug, Clone)]
pub struct CmdCd {
    path: PathBuf,
    opts: CmdOpts,
}

impl CmdCd {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            opts: CmdOpts::with_args(vec![path.display().to_string()]),
            path,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn change_dir(&self) -> CmdResult {
        let description = self.description();
        let mut draft = self.opts.draft(description.clone());
        draft.parsed_args = self.opts.parsed_args();
        draft.info(format!("RUNNING: {description}"));

        let changed = RealFileSystem
            .canonicalize(&self.path)
            .and_then(|canonical| set_working_directory(&canonical).map(|()| canonical));

        match changed {
            Ok(canonical) => {
                info!(path = %canonical.display(), "changed working directory");
                draft.cwd = Some(canonical.clone());
                draft.parsed_args = vec![canonical.display().to_string()];
                self.opts.print(
                    StreamKind::Stdout,
                    &mut draft,
                    &canonical.display().to_string(),
                );
                draft.info(format!("SUCCEEDED: {description}"));
                draft.succeed();
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %format!("{e:#}"),
                    "change directory failed"
                );
                self.opts.print(
                    StreamKind::Stderr,
                    &mut draft,
                    &format!("FAILED to CHANGE DIRECTORY: {e:#}"),
                );
                draft.info(format!("FAILED: {description}"));
                draft.fail(1, Some(CmdError::file_system("change directory to", &self.path, e)));
            }
        }

        draft.finalize()
    }
}

impl Runnable for CmdCd {
    fn description(&self) -> String {
        format!("CHANGE DIRECTORY: {}", self.path.display())
    }

    fn opts(&self) -> &CmdOpts {
        &self.opts
    }

    fn opts_mut(&mut self) -> &mut CmdOpts {
        &mut self.opts
    }

    fn run(&mut self) -> BoxFuture<'_, CmdResult> {
        Box::pin(async move { self.change_dir() })
    }
}
