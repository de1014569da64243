// src/cmd/seq.rs

use std::fmt;

use tracing::{debug, info};

use crate::cmd::builtin::{CmdCd, CmdReadTextFile, CmdWriteTextFile};
use crate::cmd::{BoxFuture, Cmd, CmdFn, CmdOpts, Runnable};
use crate::exec::{run_cmd_desc, CmdDesc};
use crate::result::{CmdResult, StreamKind};

const DEFAULT_DESCRIPTION: &str = "SEQUENCE";

/// One element of a [`CmdSeq`].
///
/// Lines and descriptors are turned into process-backed commands when the
/// sequence reaches them; any other unit runs as-is.
pub enum SeqEntry {
    Line(String),
    Desc(CmdDesc),
    Unit(Box<dyn Runnable>),
}

impl SeqEntry {
    fn description(&self, inherited: &CmdOpts) -> String {
        match self {
            SeqEntry::Line(line) => {
                inherit(CmdDesc::from_line(line), inherited).description_text()
            }
            SeqEntry::Desc(desc) => inherit(desc.clone(), inherited).description_text(),
            SeqEntry::Unit(unit) => unit.description(),
        }
    }

    /// Run the entry. Lines and descriptors pick up the sequence's explicit
    /// `quiet`, `cwd` and non-default `sudo_mode` where they leave them unset;
    /// boxed units only borrow `quiet` for this run.
    async fn run_with(&mut self, inherited: &CmdOpts) -> CmdResult {
        match self {
            SeqEntry::Line(line) => {
                let desc = inherit(CmdDesc::from_line(line), inherited);
                run_cmd_desc(&desc).await
            }
            SeqEntry::Desc(desc) => {
                let desc = inherit(desc.clone(), inherited);
                run_cmd_desc(&desc).await
            }
            SeqEntry::Unit(unit) => {
                let own_quiet = unit.opts().explicit_quiet();
                if let (None, Some(quiet)) = (own_quiet, inherited.explicit_quiet()) {
                    unit.opts_mut().set_quiet(quiet);
                }
                let result = unit.run().await;
                unit.opts_mut().restore_quiet(own_quiet);
                result
            }
        }
    }
}

fn inherit(mut desc: CmdDesc, inherited: &CmdOpts) -> CmdDesc {
    if desc.quiet.is_none() {
        desc.quiet = inherited.explicit_quiet();
    }
    if desc.cwd.is_none() {
        desc.cwd = inherited.explicit_cwd().map(Into::into);
    }
    if desc.sudo_mode == Default::default() {
        desc.sudo_mode = inherited.sudo_mode;
    }
    desc
}

impl fmt::Debug for SeqEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeqEntry::Line(line) => f.debug_tuple("Line").field(line).finish(),
            SeqEntry::Desc(desc) => f.debug_tuple("Desc").field(desc).finish(),
            SeqEntry::Unit(unit) => f.debug_tuple("Unit").field(&unit.description()).finish(),
        }
    }
}

impl From<&str> for SeqEntry {
    fn from(line: &str) -> Self {
        SeqEntry::Line(line.to_string())
    }
}

impl From<String> for SeqEntry {
    fn from(line: String) -> Self {
        SeqEntry::Line(line)
    }
}

impl From<CmdDesc> for SeqEntry {
    fn from(desc: CmdDesc) -> Self {
        SeqEntry::Desc(desc)
    }
}

impl From<Box<dyn Runnable>> for SeqEntry {
    fn from(unit: Box<dyn Runnable>) -> Self {
        SeqEntry::Unit(unit)
    }
}

macro_rules! unit_entry {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for SeqEntry {
                fn from(unit: $ty) -> Self {
                    SeqEntry::Unit(Box::new(unit))
                }
            }
        )*
    };
}

unit_entry!(Cmd, CmdSeq, CmdFn, CmdCd, CmdReadTextFile, CmdWriteTextFile);

/// Where a sequence is in its single pass over the entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeqState {
    #[default]
    Pending,
    Running,
    Completed,
}

/// Ordered units run one at a time, stopping at the first failure.
///
/// The result's `results` holds one entry per unit that was actually started.
/// `success` is true only if all of them succeeded, with exit code `0`, and
/// `1` otherwise.
#[derive(Debug)]
pub struct CmdSeq {
    entries: Vec<SeqEntry>,
    description: String,
    opts: CmdOpts,
    state: SeqState,
}

impl CmdSeq {
    pub fn new<I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<SeqEntry>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
            description: DEFAULT_DESCRIPTION.to_string(),
            opts: CmdOpts::default(),
            state: SeqState::Pending,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn push(&mut self, entry: impl Into<SeqEntry>) {
        self.entries.push(entry.into());
    }

    pub fn extend<I, E>(&mut self, entries: I)
    where
        I: IntoIterator<Item = E>,
        E: Into<SeqEntry>,
    {
        self.entries.extend(entries.into_iter().map(Into::into));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn state(&self) -> SeqState {
        self.state
    }

    /// Descriptions of the entries, in order, without running anything.
    pub fn plan(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.description(&self.opts))
            .collect()
    }

    async fn run_entries(&mut self) -> CmdResult {
        self.state = SeqState::Running;

        let mut draft = self.opts.draft(self.description.clone());
        draft.parsed_args = self.opts.parsed_args();
        draft.info(format!("RUNNING: {}", self.description));
        info!(description = %self.description, steps = self.entries.len(), "sequence started");

        let inherited = self.opts.clone();
        let total = self.entries.len();
        let mut all_ok = true;

        for (index, entry) in self.entries.iter_mut().enumerate() {
            debug!(
                step = index + 1,
                total,
                entry = %entry.description(&inherited),
                "sequence step"
            );
            let result = entry.run_with(&inherited).await;

            draft.outputs.extend(result.outputs.iter().cloned());
            draft.append(StreamKind::Stdout, &result.stdout);
            draft.append(StreamKind::Stderr, &result.stderr);

            let ok = result.success;
            draft.results.push(result);
            if !ok {
                all_ok = false;
                debug!(step = index + 1, total, "step failed; stopping sequence");
                break;
            }
        }

        if all_ok {
            draft.succeed();
        } else {
            draft.fail(1, None);
        }

        self.state = SeqState::Completed;
        info!(
            description = %self.description,
            attempted = draft.results.len(),
            total,
            success = all_ok,
            "sequence finished"
        );
        draft.finalize()
    }
}

impl Runnable for CmdSeq {
    fn description(&self) -> String {
        self.description.clone()
    }

    fn opts(&self) -> &CmdOpts {
        &self.opts
    }

    fn opts_mut(&mut self) -> &mut CmdOpts {
        &mut self.opts
    }

    fn run(&mut self) -> BoxFuture<'_, CmdResult> {
        Box::pin(self.run_entries())
    }
}
