// src/result/record.rs

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::CmdDefaults;
use crate::errors::CmdError;
use crate::fs::working_directory;
use crate::result::output::{CmdOutput, StreamKind};
use crate::types::{CmdArgs, SudoMode};

/// What running a unit produced. Built once per `run()` and never mutated
/// afterwards.
#[derive(Debug, Clone)]
pub struct CmdResult {
    /// Human summary of what ran, e.g. `ls -la /tmp` or `CHANGE DIRECTORY: foo`.
    pub description: String,

    /// Arguments exactly as supplied.
    pub args: CmdArgs,

    pub parsed_command: String,

    /// Arguments after tokenization (always a flat list).
    pub parsed_args: Vec<String>,

    pub sudo_mode: SudoMode,

    /// Working directory the unit ran in, resolved at run time.
    pub cwd: PathBuf,

    pub quiet: bool,

    pub outputs: Vec<CmdOutput>,

    /// Everything written to stdout, decoded as UTF-8.
    pub stdout: String,

    /// Everything written to stderr, decoded as UTF-8.
    pub stderr: String,

    /// Canonical success flag. For processes this normally tracks the exit
    /// code, but a runner fault also leaves it `false`.
    pub success: bool,

    /// Exit code; `-1` when the process never produced one.
    pub exit_code: i32,

    /// Fault that stopped the unit from running normally, if any. A non-zero
    /// exit on its own is not an error.
    pub error: Option<Arc<CmdError>>,

    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,

    /// Results of sub-units, in execution order. Empty unless this unit is a
    /// sequence.
    pub results: Vec<CmdResult>,
}

impl CmdResult {
    pub fn duration(&self) -> Duration {
        (self.end - self.start).to_std().unwrap_or_default()
    }

    /// One-line human summary, e.g. `✔ echo hi (exit 0, 3ms)`.
    pub fn summary(&self) -> String {
        let mark = if self.success { '✔' } else { '✘' };
        let mut line = format!(
            "{mark} {} (exit {}, {}ms)",
            self.description,
            self.exit_code,
            self.duration().as_millis()
        );
        if let Some(err) = &self.error {
            line.push_str(&format!(": {err}"));
        }
        line
    }
}

/// Mutable, in-progress form of a [`CmdResult`].
///
/// Units create one at the start of `run()`, fill it in, and turn it into a
/// `CmdResult` with [`CmdResultDraft::finalize`] on every return path.
/// `finalize` consumes the draft, so a draft can only be finalized once.
#[derive(Debug)]
pub struct CmdResultDraft {
    pub description: String,
    pub args: CmdArgs,
    pub parsed_command: String,
    pub parsed_args: Vec<String>,
    pub sudo_mode: Option<SudoMode>,
    pub cwd: Option<PathBuf>,
    pub quiet: Option<bool>,
    pub outputs: Vec<CmdOutput>,
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub exit_code: i32,
    pub error: Option<CmdError>,
    pub start: DateTime<Utc>,
    pub results: Vec<CmdResult>,
}

impl CmdResultDraft {
    /// A failed-until-proven-otherwise draft with `start` set to now.
    pub fn new(description: impl Into<String>, args: CmdArgs) -> Self {
        Self {
            description: description.into(),
            args,
            parsed_command: String::new(),
            parsed_args: Vec::new(),
            sudo_mode: None,
            cwd: None,
            quiet: None,
            outputs: Vec::new(),
            stdout: String::new(),
            stderr: String::new(),
            success: false,
            exit_code: -1,
            error: None,
            start: Utc::now(),
            results: Vec::new(),
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.outputs.push(CmdOutput::info(text));
    }

    /// Append text to the stdout or stderr accumulator.
    pub fn append(&mut self, stream: StreamKind, text: &str) {
        match stream {
            StreamKind::Stdout => self.stdout.push_str(text),
            StreamKind::Stderr => self.stderr.push_str(text),
        }
    }

    pub fn succeed(&mut self) {
        self.exit_code = 0;
        self.success = true;
    }

    pub fn fail(&mut self, exit_code: i32, error: Option<CmdError>) {
        self.exit_code = exit_code;
        self.success = false;
        if error.is_some() {
            self.error = error;
        }
    }

    /// Stamp `end`, fill unset fields from the live defaults, and freeze.
    pub fn finalize(self) -> CmdResult {
        let end = Utc::now().max(self.start);

        CmdResult {
            description: self.description,
            args: self.args,
            parsed_command: self.parsed_command,
            parsed_args: self.parsed_args,
            sudo_mode: self.sudo_mode.unwrap_or_default(),
            cwd: self.cwd.unwrap_or_else(working_directory),
            quiet: self.quiet.unwrap_or_else(CmdDefaults::quiet),
            outputs: self.outputs,
            stdout: self.stdout,
            stderr: self.stderr,
            success: self.success,
            exit_code: self.exit_code,
            error: self.error.map(Arc::new),
            start: self.start,
            end,
            results: self.results,
        }
    }
}
