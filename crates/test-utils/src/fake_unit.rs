use std::sync::{Arc, Mutex};

use cmdseq::cmd::BoxFuture;
use cmdseq::result::CmdResult;
use cmdseq::{CmdError, CmdOpts, Runnable, StreamKind};

/// Shared log of which units ran, in order.
pub type RunLog = Arc<Mutex<Vec<String>>>;

pub fn run_log() -> RunLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// A fake unit that:
/// - records its name in a shared log when run
/// - succeeds or fails as scripted, without touching the OS; a failing unit
///   carries a `CmdError::Unit` naming it.
#[derive(Debug)]
pub struct RecordingUnit {
    name: String,
    succeed: bool,
    log: RunLog,
    opts: CmdOpts,
}

impl RecordingUnit {
    pub fn ok(name: &str, log: &RunLog) -> Self {
        Self::new(name, true, log)
    }

    pub fn failing(name: &str, log: &RunLog) -> Self {
        Self::new(name, false, log)
    }

    fn new(name: &str, succeed: bool, log: &RunLog) -> Self {
        let mut opts = CmdOpts::default();
        opts.set_quiet(true);
        Self {
            name: name.to_string(),
            succeed,
            log: Arc::clone(log),
            opts,
        }
    }

    /// Boxed, ready to hand to a `CmdSeq`.
    pub fn boxed(self) -> Box<dyn Runnable> {
        Box::new(self)
    }
}

impl Runnable for RecordingUnit {
    fn description(&self) -> String {
        self.name.clone()
    }

    fn opts(&self) -> &CmdOpts {
        &self.opts
    }

    fn opts_mut(&mut self) -> &mut CmdOpts {
        &mut self.opts
    }

    fn run(&mut self) -> BoxFuture<'_, CmdResult> {
        Box::pin(async move {
            {
                let mut guard = self.log.lock().unwrap();
                guard.push(self.name.clone());
            }

            let mut draft = self.opts.draft(self.name.clone());
            if self.succeed {
                self.opts
                    .print(StreamKind::Stdout, &mut draft, &format!("{} ok", self.name));
                draft.succeed();
            } else {
                self.opts
                    .print(StreamKind::Stderr, &mut draft, &format!("{} failed", self.name));
                let error = anyhow::anyhow!("{} failed", self.name);
                draft.fail(1, Some(CmdError::Unit(error)));
            }
            draft.finalize()
        })
    }
}
