// src/cmd/opts.rs

use std::path::{Path, PathBuf};

use crate::config::CmdDefaults;
use crate::fs::working_directory;
use crate::result::{CmdResultDraft, StreamKind};
use crate::types::{CmdArgs, SudoMode};

/// Execution knobs shared by every unit.
///
/// `cwd` and `quiet` are resolved lazily: when unset, the getters fall back to
/// the live process working directory and [`CmdDefaults::quiet`] at the moment
/// they are read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CmdOpts {
    /// Arguments. For internal units this is informational only.
    pub args: CmdArgs,

    /// Only meaningful for process-backed units.
    pub sudo_mode: SudoMode,

    cwd: Option<PathBuf>,
    quiet: Option<bool>,
}

impl CmdOpts {
    pub fn with_args(args: impl Into<CmdArgs>) -> Self {
        Self {
            args: args.into(),
            ..Self::default()
        }
    }

    pub fn cwd(&self) -> PathBuf {
        self.cwd.clone().unwrap_or_else(working_directory)
    }

    pub fn set_cwd(&mut self, cwd: impl Into<PathBuf>) {
        self.cwd = Some(cwd.into());
    }

    pub fn explicit_cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub fn quiet(&self) -> bool {
        self.quiet.unwrap_or_else(CmdDefaults::quiet)
    }

    pub fn set_quiet(&mut self, quiet: bool) {
        self.quiet = Some(quiet);
    }

    pub fn explicit_quiet(&self) -> Option<bool> {
        self.quiet
    }

    /// Put back an explicit value read from [`Self::explicit_quiet`]; `None`
    /// makes `quiet` follow the defaults again.
    pub fn restore_quiet(&mut self, quiet: Option<bool>) {
        self.quiet = quiet;
    }

    /// Arguments as a flat list.
    pub fn parsed_args(&self) -> Vec<String> {
        self.args.to_vec()
    }

    /// Fresh draft for a run of a unit with these knobs, with `cwd` and
    /// `quiet` resolved now.
    pub fn draft(&self, description: impl Into<String>) -> CmdResultDraft {
        let mut draft = CmdResultDraft::new(description, self.args.clone());
        draft.sudo_mode = Some(self.sudo_mode);
        draft.cwd = Some(self.cwd());
        draft.quiet = Some(self.quiet());
        draft
    }

    /// [`super::print`] with this unit's resolved `quiet`.
    pub fn print(&self, stream: StreamKind, draft: &mut CmdResultDraft, text: &str) {
        super::print(stream, draft, text, self.quiet());
    }
}
