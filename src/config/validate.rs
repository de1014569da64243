// src/config/validate.rs

use crate::config::model::{RawSequenceFile, RawStep, SequenceFile, Step};
use crate::errors::{CmdError, Result};
use crate::exec::CmdDesc;
use crate::parse::parse_command_line;

impl TryFrom<RawSequenceFile> for SequenceFile {
    type Error = CmdError;

    fn try_from(raw: RawSequenceFile) -> std::result::Result<Self, Self::Error> {
        ensure_has_steps(&raw)?;

        let steps = raw
            .steps
            .into_iter()
            .enumerate()
            .map(|(index, step)| validate_step(index + 1, step))
            .collect::<Result<Vec<_>>>()?;

        Ok(SequenceFile::new_unchecked(raw.description, raw.quiet, steps))
    }
}

fn ensure_has_steps(raw: &RawSequenceFile) -> Result<()> {
    if raw.steps.is_empty() {
        return Err(CmdError::Config(
            "sequence file must contain at least one [[step]] table".to_string(),
        ));
    }
    Ok(())
}

/// Validate one step; `n` is its 1-based position, used in messages.
fn validate_step(n: usize, step: RawStep) -> Result<Step> {
    let actions = action_names(&step);
    match actions.len() {
        0 => {
            return Err(step_error(
                n,
                "must set one of `run`, `cmd`, `cd`, `read`, `write` or `script`",
            ));
        }
        1 => {}
        _ => {
            return Err(step_error(
                n,
                &format!("sets more than one action ({})", actions.join(", ")),
            ));
        }
    }

    if step.args.is_some() && step.cmd.is_none() {
        return Err(step_error(n, "`args` is only allowed together with `cmd`"));
    }

    let process_only = step.sudo.is_some() || step.cwd.is_some() || step.description.is_some();
    if process_only && step.run.is_none() && step.cmd.is_none() {
        return Err(step_error(
            n,
            "`sudo`, `cwd` and `description` are only allowed with `run` or `cmd`",
        ));
    }

    let RawStep {
        run,
        cmd,
        args,
        sudo,
        cwd,
        quiet,
        description,
        cd,
        read,
        write,
        script,
    } = step;

    if let Some(line) = run {
        let parsed = parse_command_line(&line, false);
        if parsed.command.is_empty() {
            return Err(step_error(n, "`run` must contain a command"));
        }
        let desc = CmdDesc {
            cmd: parsed.command,
            args: parsed.args.into(),
            sudo_mode: sudo.unwrap_or_default(),
            cwd,
            quiet,
            description,
        };
        return Ok(Step::Command(desc));
    }

    if let Some(cmd) = cmd {
        if cmd.trim().is_empty() {
            return Err(step_error(n, "`cmd` must not be empty"));
        }
        let desc = CmdDesc {
            cmd,
            args: args.unwrap_or_default(),
            sudo_mode: sudo.unwrap_or_default(),
            cwd,
            quiet,
            description,
        };
        return Ok(Step::Command(desc));
    }

    if let Some(path) = cd {
        return Ok(Step::Cd { path, quiet });
    }

    if let Some(path) = read {
        return Ok(Step::Read { path, quiet });
    }

    if let Some(write) = write {
        return Ok(Step::Write {
            path: write.path,
            text: write.text,
            quiet,
        });
    }

    match script {
        Some(block) => Ok(Step::Script { block, quiet }),
        None => Err(step_error(n, "has no action")),
    }
}

fn action_names(step: &RawStep) -> Vec<&'static str> {
    let mut names = Vec::new();
    if step.run.is_some() {
        names.push("run");
    }
    if step.cmd.is_some() {
        names.push("cmd");
    }
    if step.cd.is_some() {
        names.push("cd");
    }
    if step.read.is_some() {
        names.push("read");
    }
    if step.write.is_some() {
        names.push("write");
    }
    if step.script.is_some() {
        names.push("script");
    }
    names
}

fn step_error(n: usize, msg: &str) -> CmdError {
    CmdError::Config(format!("step {n}: {msg}"))
}
