#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

pub use cmdseq_test_utils::builders;
pub use cmdseq_test_utils::fake_unit::{run_log, RecordingUnit, RunLog};
pub use cmdseq_test_utils::{init_tracing, with_timeout, with_timeout_secs};

static PROCESS_STATE: Mutex<()> = Mutex::new(());

/// Serialise tests that touch process-wide state: the working directory or
/// `CmdDefaults`.
pub fn process_state_lock() -> MutexGuard<'static, ()> {
    PROCESS_STATE.lock().unwrap_or_else(|e| e.into_inner())
}

/// Restores the working directory when dropped.
pub struct CwdGuard {
    original: PathBuf,
}

impl CwdGuard {
    pub fn new() -> Self {
        Self {
            original: std::env::current_dir().expect("current dir"),
        }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Shell loop printing `line 1` .. `line N`, sleeping between writes.
pub fn slow_lines_script(lines: usize, delay: &str) -> String {
    let numbers: Vec<String> = (1..=lines).map(|i| i.to_string()).collect();
    format!(
        "for i in {}; do echo \"line $i\"; sleep {delay}; done",
        numbers.join(" ")
    )
}
