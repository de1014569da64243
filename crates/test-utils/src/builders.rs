#![allow(dead_code)]

use std::path::PathBuf;

use cmdseq::config::{RawSequenceFile, RawStep, RawWrite, SequenceFile};
use cmdseq::{CmdArgs, SudoMode};

/// Builder for `SequenceFile` to simplify test setup.
pub struct SequenceFileBuilder {
    file: RawSequenceFile,
}

impl SequenceFileBuilder {
    pub fn new() -> Self {
        Self {
            file: RawSequenceFile::default(),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.file.description = Some(description.to_string());
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.file.quiet = Some(quiet);
        self
    }

    pub fn step(mut self, step: RawStep) -> Self {
        self.file.steps.push(step);
        self
    }

    /// The unvalidated file, for tests that expect validation to fail.
    pub fn raw(self) -> RawSequenceFile {
        self.file
    }

    pub fn build(self) -> SequenceFile {
        SequenceFile::try_from(self.file).expect("Failed to build valid sequence file from builder")
    }
}

impl Default for SequenceFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one `RawStep`.
pub struct StepBuilder {
    step: RawStep,
}

impl StepBuilder {
    /// `run = "<line>"`
    pub fn run(line: &str) -> Self {
        Self::with(RawStep {
            run: Some(line.to_string()),
            ..RawStep::default()
        })
    }

    /// `cmd = "<program>"`
    pub fn cmd(program: &str) -> Self {
        Self::with(RawStep {
            cmd: Some(program.to_string()),
            ..RawStep::default()
        })
    }

    pub fn cd(path: impl Into<PathBuf>) -> Self {
        Self::with(RawStep {
            cd: Some(path.into()),
            ..RawStep::default()
        })
    }

    pub fn read(path: impl Into<PathBuf>) -> Self {
        Self::with(RawStep {
            read: Some(path.into()),
            ..RawStep::default()
        })
    }

    pub fn write(path: impl Into<PathBuf>, text: &str) -> Self {
        Self::with(RawStep {
            write: Some(RawWrite {
                path: path.into(),
                text: text.to_string(),
            }),
            ..RawStep::default()
        })
    }

    pub fn script(block: &str) -> Self {
        Self::with(RawStep {
            script: Some(block.to_string()),
            ..RawStep::default()
        })
    }

    /// A step with no action at all.
    pub fn empty() -> Self {
        Self::with(RawStep::default())
    }

    fn with(step: RawStep) -> Self {
        Self { step }
    }

    pub fn args(mut self, args: impl Into<CmdArgs>) -> Self {
        self.step.args = Some(args.into());
        self
    }

    pub fn sudo(mut self, mode: SudoMode) -> Self {
        self.step.sudo = Some(mode);
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.step.cwd = Some(cwd.into());
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.step.quiet = Some(quiet);
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.step.description = Some(description.to_string());
        self
    }

    /// Also set `cd`, producing a step with two actions.
    pub fn also_cd(mut self, path: impl Into<PathBuf>) -> Self {
        self.step.cd = Some(path.into());
        self
    }

    pub fn build(self) -> RawStep {
        self.step
    }
}
