// src/config/defaults.rs

//! Process-wide defaults for unit knobs that were left unset.
//!
//! Units read these at `run()` time, not at construction time, so changing a
//! default affects every unit that has not been run yet.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use tracing::debug;

static QUIET: AtomicBool = AtomicBool::new(false);
static SUDO_PROGRAM: RwLock<Option<String>> = RwLock::new(None);

const DEFAULT_SUDO_PROGRAM: &str = "sudo";

/// Environment variable that sets the default `quiet` (`1`/`true`/`yes`).
pub const QUIET_ENV: &str = "CMDSEQ_QUIET";

/// Environment variable naming the privilege-escalation program.
pub const SUDO_ENV: &str = "CMDSEQ_SUDO";

/// Namespace for the process-wide defaults.
pub struct CmdDefaults;

impl CmdDefaults {
    /// Default `quiet` for units that do not set their own. `false` unless
    /// changed.
    pub fn quiet() -> bool {
        QUIET.load(Ordering::Relaxed)
    }

    pub fn set_quiet(quiet: bool) {
        QUIET.store(quiet, Ordering::Relaxed);
    }

    /// Program used for `SudoMode::Interactive` / `SudoMode::NoPrompt`.
    pub fn sudo_program() -> String {
        let guard = SUDO_PROGRAM.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard
            .clone()
            .unwrap_or_else(|| DEFAULT_SUDO_PROGRAM.to_string())
    }

    pub fn set_sudo_program(program: impl Into<String>) {
        let mut guard = SUDO_PROGRAM.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(program.into());
    }

    /// Apply `CMDSEQ_QUIET` and `CMDSEQ_SUDO` if they are set.
    pub fn apply_env() {
        if let Some(quiet) = std::env::var(QUIET_ENV).ok().and_then(|s| parse_bool(&s)) {
            debug!(quiet, "default quiet taken from {QUIET_ENV}");
            Self::set_quiet(quiet);
        }

        if let Ok(program) = std::env::var(SUDO_ENV) {
            let program = program.trim();
            if !program.is_empty() {
                debug!(program, "sudo program taken from {SUDO_ENV}");
                Self::set_sudo_program(program);
            }
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
