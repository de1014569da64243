// src/exec/descriptor.rs

use std::path::PathBuf;

use crate::config::CmdDefaults;
use crate::exec::invocation::Invocation;
use crate::parse::parse_command_line;
use crate::types::{CmdArgs, SudoMode};

/// Plain configuration for a process-backed unit.
///
/// Unset `cwd` and `quiet` are resolved when the command runs, not when the
/// descriptor is built: `cwd` falls back to the live process working
/// directory and `quiet` to [`CmdDefaults::quiet`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CmdDesc {
    /// Program to run, e.g. `ls` or `/bin/ls`.
    pub cmd: String,

    pub args: CmdArgs,

    pub sudo_mode: SudoMode,

    pub cwd: Option<PathBuf>,

    pub quiet: Option<bool>,

    /// Replaces the default description (the space-joined invocation).
    pub description: Option<String>,
}

impl CmdDesc {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            ..Self::default()
        }
    }

    /// Tokenize a whole command line: the first token is the program.
    pub fn from_line(line: &str) -> Self {
        let parsed = parse_command_line(line, false);
        Self {
            cmd: parsed.command,
            args: CmdArgs::List(parsed.args),
            ..Self::default()
        }
    }

    /// Build from an argv-style list (`[program, arg, ...]`).
    pub fn from_argv<S: AsRef<str>>(argv: &[S]) -> Self {
        let mut parts = argv.iter().map(|s| s.as_ref().to_string());
        let cmd = parts.next().unwrap_or_default();
        Self {
            cmd,
            args: CmdArgs::List(parts.collect()),
            ..Self::default()
        }
    }

    pub fn with_args(mut self, args: impl Into<CmdArgs>) -> Self {
        self.args = args.into();
        self
    }

    pub fn with_sudo(mut self, sudo_mode: SudoMode) -> Self {
        self.sudo_mode = sudo_mode;
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = Some(quiet);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Final argv (including any sudo prefix) for the current defaults.
    pub fn invocation(&self) -> Invocation {
        Invocation::build(
            &self.cmd,
            &self.args.to_vec(),
            self.sudo_mode,
            &CmdDefaults::sudo_program(),
        )
    }

    /// The description a run of this descriptor would report.
    pub fn description_text(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| self.invocation().to_string())
    }
}

impl From<&str> for CmdDesc {
    fn from(line: &str) -> Self {
        CmdDesc::from_line(line)
    }
}

impl From<String> for CmdDesc {
    fn from(line: String) -> Self {
        CmdDesc::from_line(&line)
    }
}

impl From<Vec<String>> for CmdDesc {
    fn from(argv: Vec<String>) -> Self {
        CmdDesc::from_argv(&argv)
    }
}

impl From<&[&str]> for CmdDesc {
    fn from(argv: &[&str]) -> Self {
        CmdDesc::from_argv(argv)
    }
}

impl<const N: usize> From<[&str; N]> for CmdDesc {
    fn from(argv: [&str; N]) -> Self {
        CmdDesc::from_argv(&argv)
    }
}
