use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::parse::parse_command_line;

/// Whether, and how, a process-backed unit is run through the
/// privilege-escalation program (`sudo` unless reconfigured).
///
/// - `None`: run the command directly (default).
/// - `Interactive`: prefix with `sudo` and connect stdin to the caller's
///   terminal so a password can be typed.
/// - `NoPrompt`: prefix with `sudo -n`; if a password would be needed, sudo
///   itself fails instead of blocking.
///
/// Internal (synthetic) units ignore this: they run inside the current
/// process with whatever privileges it already has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SudoMode {
    #[default]
    None,
    Interactive,
    NoPrompt,
}

impl SudoMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SudoMode::None => "none",
            SudoMode::Interactive => "interactive",
            SudoMode::NoPrompt => "noPrompt",
        }
    }
}

impl fmt::Display for SudoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SudoMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(SudoMode::None),
            "interactive" => Ok(SudoMode::Interactive),
            "noprompt" | "no-prompt" | "no_prompt" => Ok(SudoMode::NoPrompt),
            other => Err(format!(
                "invalid sudo mode: {other} (expected \"none\", \"interactive\" or \"noPrompt\")"
            )),
        }
    }
}

/// Arguments as supplied by the caller: either one raw string that still needs
/// tokenizing, or an already-split list.
///
/// Every public entry point normalizes this with [`CmdArgs::to_vec`] straight
/// away; the raw form is only kept so results can report what was supplied.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CmdArgs {
    Raw(String),
    List(Vec<String>),
}

impl CmdArgs {
    /// Flat argument list. A raw string is tokenized in args-only mode, so
    /// its first token is an argument rather than a command.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            CmdArgs::Raw(raw) => parse_command_line(raw, true).args,
            CmdArgs::List(list) => list.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CmdArgs::Raw(raw) => raw.trim().is_empty(),
            CmdArgs::List(list) => list.is_empty(),
        }
    }
}

impl Default for CmdArgs {
    fn default() -> Self {
        CmdArgs::List(Vec::new())
    }
}

impl From<&str> for CmdArgs {
    fn from(raw: &str) -> Self {
        CmdArgs::Raw(raw.to_string())
    }
}

impl From<String> for CmdArgs {
    fn from(raw: String) -> Self {
        CmdArgs::Raw(raw)
    }
}

impl From<Vec<String>> for CmdArgs {
    fn from(list: Vec<String>) -> Self {
        CmdArgs::List(list)
    }
}

impl From<Vec<&str>> for CmdArgs {
    fn from(list: Vec<&str>) -> Self {
        CmdArgs::List(list.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for CmdArgs {
    fn from(list: &[&str]) -> Self {
        CmdArgs::List(list.iter().map(|s| s.to_string()).collect())
    }
}
