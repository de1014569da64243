// src/exec/runner.rs

//! Running one external process to completion.

use std::io;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tokio::task::JoinError;
use tracing::{error, info, warn};

use crate::cmd::Runnable;
use crate::config::CmdDefaults;
use crate::errors::CmdError;
use crate::exec::descriptor::CmdDesc;
use crate::exec::drain::{drain_stream, DrainedStream};
use crate::fs::working_directory;
use crate::result::{CmdOutput, CmdResult, CmdResultDraft, StreamKind};

/// Run whatever `target` converts to: a full command line (`"ls -la /"`), an
/// argv list (`["ls", "-la", "/"]`) or a [`CmdDesc`].
pub async fn run(target: impl Into<CmdDesc>) -> CmdResult {
    run_cmd_desc(&target.into()).await
}

/// Run any unit. Same as calling `unit.run()`.
pub async fn run_unit(unit: &mut dyn Runnable) -> CmdResult {
    unit.run().await
}

/// Spawn the process described by `desc`, capture its output, and wait for it.
///
/// Never returns an error: a spawn fault or a failure while waiting is stored
/// in the result's `error` with `success = false` and exit code `-1`. A
/// non-zero exit is just `success = false` with the real exit code.
pub async fn run_cmd_desc(desc: &CmdDesc) -> CmdResult {
    let parsed_args = desc.args.to_vec();
    let quiet = desc.quiet.unwrap_or_else(CmdDefaults::quiet);
    let cwd = desc.cwd.clone().unwrap_or_else(working_directory);
    let invocation = desc.invocation();
    let description = desc
        .description
        .clone()
        .unwrap_or_else(|| invocation.to_string());

    let mut draft = CmdResultDraft::new(description, desc.args.clone());
    draft.parsed_command = desc.cmd.clone();
    draft.parsed_args = parsed_args;
    draft.sudo_mode = Some(desc.sudo_mode);
    draft.cwd = Some(cwd.clone());
    draft.quiet = Some(quiet);

    if !quiet {
        println!("\n\n🚀 {invocation}\n");
    }

    info!(
        cmd = %invocation,
        cwd = %cwd.display(),
        sudo = %desc.sudo_mode,
        "starting process"
    );

    let mut command = Command::new(&invocation.program);
    command
        .args(&invocation.args)
        .current_dir(&cwd)
        .stdin(invocation.stdin.stdio())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(source) => {
            error!(cmd = %invocation, error = %source, "failed to spawn process");
            draft.fail(
                -1,
                Some(CmdError::Spawn {
                    program: invocation.program.clone(),
                    source,
                }),
            );
            return draft.finalize();
        }
    };

    let echo = !quiet;
    let stdout_task = child
        .stdout
        .take()
        .map(|out| tokio::spawn(drain_stream(out, StreamKind::Stdout, echo)));
    let stderr_task = child
        .stderr
        .take()
        .map(|err| tokio::spawn(drain_stream(err, StreamKind::Stderr, echo)));

    let status = child.wait().await;
    if status.is_err() {
        // The child may still hold the pipes open; the drains only finish once it is gone.
        if let Err(e) = child.start_kill() {
            warn!(cmd = %invocation, error = %e, "failed to kill process");
        }
    }

    // Exit is not the end of output: trailing chunks may still be in flight,
    // so both drains must reach end-of-file before anything is read back.
    let mut drained: Vec<DrainedStream> = Vec::with_capacity(2);
    let mut drain_fault = None;
    for task in [stdout_task, stderr_task].into_iter().flatten() {
        match task.await {
            Ok(stream) => drained.push(stream),
            Err(e) => {
                warn!(cmd = %invocation, error = %e, "output drain task failed");
                if drain_fault.is_none() {
                    drain_fault = Some(e);
                }
            }
        }
    }

    drained.sort_by_key(|stream| stream.closed_at);
    for stream in drained {
        draft.append(stream.kind, &stream.text);
        if !stream.bytes.is_empty() {
            draft
                .outputs
                .push(CmdOutput::stream(stream.kind, stream.bytes));
        }
    }

    settle_exit(&mut draft, &invocation.program, status, drain_fault);

    draft.finalize()
}

/// Record how a process ended on `draft`.
///
/// A clean exit only counts as success when every output drain finished; a
/// lost drain or a failed wait leaves `success = false` with exit code `-1`.
pub fn settle_exit(
    draft: &mut CmdResultDraft,
    program: &str,
    status: io::Result<ExitStatus>,
    drain_fault: Option<JoinError>,
) {
    match (status, drain_fault) {
        (Ok(status), None) => {
            let code = status.code().unwrap_or(-1);
            if status.success() {
                draft.succeed();
            } else {
                draft.fail(code, None);
            }
            info!(
                program,
                exit_code = code,
                success = status.success(),
                "process exited"
            );
        }
        (Ok(status), Some(source)) => {
            error!(program, exit_code = ?status.code(), error = %source, "output was lost");
            draft.fail(
                -1,
                Some(CmdError::Drain {
                    program: program.to_string(),
                    source,
                }),
            );
        }
        (Err(source), _) => {
            error!(program, error = %source, "failed waiting for process");
            draft.fail(
                -1,
                Some(CmdError::Wait {
                    program: program.to_string(),
                    source,
                }),
            );
        }
    }
}
