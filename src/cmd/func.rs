// src/cmd/func.rs

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use anyhow::anyhow;
use tracing::{info, warn};

use crate::cmd::{BoxFuture, CmdOpts, Runnable};
use crate::errors::CmdError;
use crate::result::{CmdResult, CmdResultDraft, StreamKind};

/// Output handle passed to a [`CmdFn`] body.
///
/// Text printed here is recorded in the result and echoed unless the unit is
/// quiet, the same way process output is.
pub struct FnContext<'a> {
    draft: &'a mut CmdResultDraft,
    quiet: bool,
}

impl FnContext<'_> {
    pub fn print(&mut self, stream: StreamKind, text: &str) {
        super::print(stream, self.draft, text, self.quiet);
    }

    pub fn stdout(&mut self, text: &str) {
        self.print(StreamKind::Stdout, text);
    }

    pub fn stderr(&mut self, text: &str) {
        self.print(StreamKind::Stderr, text);
    }

    /// Add an `info` event without touching stdout/stderr.
    pub fn info(&mut self, text: impl Into<String>) {
        self.draft.info(text);
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }
}

type Body = Box<dyn FnMut(&mut FnContext<'_>) -> anyhow::Result<()> + Send>;

/// A unit whose body is a caller-supplied closure.
///
/// `Ok(())` means success (exit `0`); an `Err` or a panic means failure
/// (exit `1`) with the error attached and written to stderr.
///
/// ```no_run
/// # async fn demo() {
/// use cmdseq::cmd::{CmdFn, Runnable};
///
/// let mut hello = CmdFn::new("SAY HELLO", |ctx| {
///     ctx.stdout("hello");
///     Ok(())
/// });
/// let result = hello.run().await;
/// assert_eq!(result.stdout, "hello");
/// # }
/// ```
pub struct CmdFn {
    description: String,
    opts: CmdOpts,
    body: Body,
}

impl CmdFn {
    pub fn new<F>(description: impl Into<String>, body: F) -> Self
    where
        F: FnMut(&mut FnContext<'_>) -> anyhow::Result<()> + Send + 'static,
    {
        Self {
            description: description.into(),
            opts: CmdOpts::default(),
            body: Box::new(body),
        }
    }

    fn run_body(&mut self) -> CmdResult {
        let quiet = self.opts.quiet();
        let mut draft = self.opts.draft(self.description.clone());
        draft.parsed_args = self.opts.parsed_args();
        draft.info(format!("RUNNING: {}", self.description));

        let outcome = {
            let mut ctx = FnContext {
                draft: &mut draft,
                quiet,
            };
            let body = &mut self.body;
            catch_unwind(AssertUnwindSafe(|| body(&mut ctx)))
                .unwrap_or_else(|panic| Err(anyhow!("panicked: {}", panic_message(&*panic))))
        };

        match outcome {
            Ok(()) => {
                draft.succeed();
                draft.info(format!("SUCCEEDED: {}", self.description));
                info!(description = %self.description, "function unit succeeded");
            }
            Err(e) => {
                warn!(
                    description = %self.description,
                    error = %format!("{e:#}"),
                    "function unit failed"
                );
                self.opts
                    .print(StreamKind::Stderr, &mut draft, &format!("FAILED: {e:#}"));
                draft.info(format!("FAILED: {}", self.description));
                draft.fail(1, Some(CmdError::Unit(e)));
            }
        }

        draft.finalize()
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl fmt::Debug for CmdFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CmdFn")
            .field("description", &self.description)
            .field("opts", &self.opts)
            .finish_non_exhaustive()
    }
}

impl Runnable for CmdFn {
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
        Box::pin(async move { self.run_body() })
    }
}
