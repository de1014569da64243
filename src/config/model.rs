// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::cmd::builtin::{CmdCd, CmdReadTextFile, CmdWriteTextFile};
use crate::cmd::{Cmd, CmdSeq, Runnable, SeqEntry};
use crate::exec::CmdDesc;
use crate::types::{CmdArgs, SudoMode};

/// A sequence file as read from TOML.
///
/// ```toml
/// description = "bootstrap"
/// quiet = true
///
/// [[step]]
/// run = "ls -la /tmp"
///
/// [[step]]
/// cmd = "apt-get"
/// args = ["install", "-y", "curl"]
/// sudo = "noPrompt"
///
/// [[step]]
/// cd = "subdir"
///
/// [[step]]
/// write = { path = "out.txt", text = "hello" }
/// ```
///
/// Everything is optional at this level; [`SequenceFile::try_from`] decides
/// what is actually valid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSequenceFile {
    /// Description of the whole sequence; defaults to `SEQUENCE`.
    #[serde(default)]
    pub description: Option<String>,

    /// `quiet` applied to every step that does not set its own.
    #[serde(default)]
    pub quiet: Option<bool>,

    /// Steps from `[[step]]` tables, in file order.
    #[serde(default, rename = "step")]
    pub steps: Vec<RawStep>,
}

/// One `[[step]]` table. Exactly one of `run`, `cmd`, `cd`, `read`, `write`
/// or `script` must be present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawStep {
    /// A whole command line, tokenized into command + arguments.
    #[serde(default)]
    pub run: Option<String>,

    /// Program to execute; arguments come from `args`.
    #[serde(default)]
    pub cmd: Option<String>,

    /// Arguments for `cmd`: a list, or a raw string tokenized when the command runs.
    #[serde(default)]
    pub args: Option<CmdArgs>,

    #[serde(default)]
    pub sudo: Option<SudoMode>,

    #[serde(default)]
    pub cwd: Option<PathBuf>,

    #[serde(default)]
    pub quiet: Option<bool>,

    /// Overrides the invocation-derived description of a `run`/`cmd` step.
    #[serde(default)]
    pub description: Option<String>,

    /// Change the process working directory.
    #[serde(default)]
    pub cd: Option<PathBuf>,

    /// Read a text file into stdout.
    #[serde(default)]
    pub read: Option<PathBuf>,

    /// Write text to a file.
    #[serde(default)]
    pub write: Option<RawWrite>,

    /// A multiline command block, run as a nested sequence.
    #[serde(default)]
    pub script: Option<String>,
}

/// `write = { path = "...", text = "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawWrite {
    pub path: PathBuf,
    pub text: String,
}

/// A validated step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// A process-backed command (`run` or `cmd`).
    Command(CmdDesc),
    Cd {
        path: PathBuf,
        quiet: Option<bool>,
    },
    Read {
        path: PathBuf,
        quiet: Option<bool>,
    },
    Write {
        path: PathBuf,
        text: String,
        quiet: Option<bool>,
    },
    /// Command block; each logical line becomes one command.
    Script {
        block: String,
        quiet: Option<bool>,
    },
}

impl Step {
    /// Build the runnable unit for this step. `default_quiet` fills in an
    /// unset per-step `quiet`.
    pub fn into_entry(self, default_quiet: Option<bool>) -> SeqEntry {
        match self {
            Step::Command(mut desc) => {
                if desc.quiet.is_none() {
                    desc.quiet = default_quiet;
                }
                SeqEntry::from(Cmd::from_desc(desc))
            }
            Step::Cd { path, quiet } => {
                with_quiet(CmdCd::new(path), quiet.or(default_quiet)).into()
            }
            Step::Read { path, quiet } => {
                with_quiet(CmdReadTextFile::new(path), quiet.or(default_quiet)).into()
            }
            Step::Write { path, text, quiet } => {
                with_quiet(CmdWriteTextFile::new(path, text), quiet.or(default_quiet)).into()
            }
            Step::Script { block, quiet } => {
                with_quiet(Cmd::seq(&block), quiet.or(default_quiet)).into()
            }
        }
    }
}

fn with_quiet<R: Runnable>(mut unit: R, quiet: Option<bool>) -> R {
    if let Some(quiet) = quiet {
        unit.opts_mut().set_quiet(quiet);
    }
    unit
}

/// Validated sequence file. Construct via `TryFrom<RawSequenceFile>`.
#[derive(Debug, Clone)]
pub struct SequenceFile {
    pub description: Option<String>,
    pub quiet: Option<bool>,
    pub steps: Vec<Step>,
}

impl SequenceFile {
    pub(crate) fn new_unchecked(
        description: Option<String>,
        quiet: Option<bool>,
        steps: Vec<Step>,
    ) -> Self {
        Self {
            description,
            quiet,
            steps,
        }
    }

    /// Turn the file into a runnable sequence.
    pub fn into_seq(self) -> CmdSeq {
        let quiet = self.quiet;
        let description = self.description.clone();

        let mut seq = CmdSeq::new(self.into_entries());
        if let Some(description) = description {
            seq = seq.with_description(description);
        }
        if let Some(quiet) = quiet {
            seq.opts_mut().set_quiet(quiet);
        }
        seq
    }

    /// The steps as `SeqEntry`s, applying the file-level `quiet`.
    pub fn into_entries(self) -> Vec<SeqEntry> {
        let quiet = self.quiet;
        self.steps
            .into_iter()
            .map(|step| step.into_entry(quiet))
            .collect()
    }
}
