// src/exec/invocation.rs

use std::fmt;
use std::process::Stdio;

use crate::types::SudoMode;

/// How the child's stdin is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdinMode {
    /// Not connected (`/dev/null`).
    Null,
    /// Shared with the caller's terminal, so prompts can be answered.
    Inherit,
}

impl StdinMode {
    pub fn stdio(self) -> Stdio {
        match self {
            StdinMode::Null => Stdio::null(),
            StdinMode::Inherit => Stdio::inherit(),
        }
    }
}

/// The exact program + argument vector that will be spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: StdinMode,
}

impl Invocation {
    /// Apply the sudo mode to `cmd args...`.
    ///
    /// - `None`: `cmd args...`, stdin null.
    /// - `Interactive`: `sudo cmd args...`, stdin inherited for the password prompt.
    /// - `NoPrompt`: `sudo -n cmd args...`, stdin null; sudo fails on its own
    ///   if it would need a password.
    pub fn build(cmd: &str, args: &[String], sudo_mode: SudoMode, sudo_program: &str) -> Self {
        match sudo_mode {
            SudoMode::None => Self {
                program: cmd.to_string(),
                args: args.to_vec(),
                stdin: StdinMode::Null,
            },
            SudoMode::Interactive => Self {
                program: sudo_program.to_string(),
                args: std::iter::once(cmd.to_string())
                    .chain(args.iter().cloned())
                    .collect(),
                stdin: StdinMode::Inherit,
            },
            SudoMode::NoPrompt => Self {
                program: sudo_program.to_string(),
                args: ["-n".to_string(), cmd.to_string()]
                    .into_iter()
                    .chain(args.iter().cloned())
                    .collect(),
                stdin: StdinMode::Null,
            },
        }
    }

    /// `[program, args...]`.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv().join(" "))
    }
}
