// tests/runner.rs
mod common;
use crate::common::{init_tracing, slow_lines_script, with_timeout, with_timeout_secs};

use std::error::Error;

use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

use cmdseq::exec::{run_cmd_desc, settle_exit, Invocation, StdinMode};
use cmdseq::result::CmdResultDraft;
use cmdseq::{
    run, Cmd, CmdArgs, CmdDesc, CmdError, CmdOutput, CmdResult, Runnable, StreamKind, SudoMode,
};

type TestResult = Result<(), Box<dyn Error>>;

fn quiet(desc: CmdDesc) -> CmdDesc {
    desc.with_quiet(true)
}

#[tokio::test]
async fn echo_without_arguments_prints_a_newline() -> TestResult {
    with_timeout(async {
        init_tracing();

        let result = run_cmd_desc(&quiet(CmdDesc::new("echo"))).await;

        assert!(result.success);
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout, "\n");
        assert_eq!(result.stderr, "");
        assert!(result.error.is_none());
        assert!(result.end >= result.start);
        assert!(result.quiet);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn raw_argument_string_is_tokenized() -> TestResult {
    with_timeout(async {
        init_tracing();

        let mut cmd = Cmd::new("echo", "'hello   world' again");
        cmd.opts_mut().set_quiet(true);
        let result = cmd.run().await;

        assert!(result.success);
        assert_eq!(result.args, CmdArgs::Raw("'hello   world' again".to_string()));
        assert_eq!(result.parsed_command, "echo");
        assert_eq!(result.parsed_args, vec!["hello   world", "again"]);
        assert_eq!(result.stdout, "hello   world again\n");
        assert_eq!(result.description, "echo hello   world again");
        Ok(())
    })
    .await
}

#[tokio::test]
async fn argument_list_is_passed_verbatim() -> TestResult {
    with_timeout(async {
        init_tracing();

        let desc = quiet(CmdDesc::new("echo").with_args(vec!["a  b", "'c'"]));
        let result = run(desc).await;

        assert!(result.success);
        assert_eq!(result.stdout, "a  b 'c'\n");
        Ok(())
    })
    .await
}

#[tokio::test]
async fn run_accepts_lines_and_argv() -> TestResult {
    with_timeout(async {
        init_tracing();

        let from_line = run(CmdDesc::from_line("echo 'one two'").with_quiet(true)).await;
        assert_eq!(from_line.stdout, "one two\n");

        let from_argv = run(CmdDesc::from(["echo", "three four"]).with_quiet(true)).await;
        assert_eq!(from_argv.stdout, "three four\n");
        assert_eq!(from_argv.parsed_args, vec!["three four"]);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn missing_path_is_a_non_zero_exit_not_an_error() -> TestResult {
    with_timeout(async {
        init_tracing();

        let result = run(quiet(CmdDesc::from_line(
            "ls /definitely/not/a/real/path/cmdseq",
        )))
        .await;

        assert!(!result.success);
        assert_ne!(result.exit_code, 0);
        assert!(result.error.is_none());
        assert!(
            result.stderr.to_lowercase().contains("no such file"),
            "stderr was: {}",
            result.stderr
        );
        Ok(())
    })
    .await
}

#[tokio::test]
async fn exit_code_is_reported() -> TestResult {
    with_timeout(async {
        init_tracing();

        let result = run(quiet(CmdDesc::new("sh").with_args(vec!["-c", "exit 3"]))).await;

        assert!(!result.success);
        assert_eq!(result.exit_code, 3);
        assert!(result.error.is_none());
        Ok(())
    })
    .await
}

#[tokio::test]
async fn spawn_failure_is_folded_into_the_result() -> TestResult {
    with_timeout(async {
        init_tracing();

        let result = run(quiet(CmdDesc::new("cmdseq-no-such-program-xyz"))).await;

        assert!(!result.success);
        assert_eq!(result.exit_code, -1);
        assert_eq!(result.stdout, "");
        assert_eq!(result.stderr, "");
        assert!(result.outputs.is_empty());
        match result.error.as_deref() {
            Some(CmdError::Spawn { program, .. }) => {
                assert_eq!(program, "cmdseq-no-such-program-xyz")
            }
            other => panic!("expected spawn error, got {other:?}"),
        }
        assert!(result.summary().starts_with('✘'));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn both_streams_are_captured_as_separate_events() -> TestResult {
    with_timeout(async {
        init_tracing();

        let script = "echo out; echo err 1>&2";
        let result = run(quiet(CmdDesc::new("sh").with_args(vec!["-c", script]))).await;

        assert!(result.success);
        assert_eq!(result.stdout, "out\n");
        assert_eq!(result.stderr, "err\n");

        let mut kinds: Vec<StreamKind> =
            result.outputs.iter().filter_map(|o| o.stream_kind()).collect();
        kinds.sort_by_key(|k| k.to_string());
        assert_eq!(kinds, vec![StreamKind::Stderr, StreamKind::Stdout]);
        assert!(result.outputs.contains(&CmdOutput::Stdout {
            content: b"out\n".to_vec()
        }));
        Ok(())
    })
    .await
}

fn stream_order(result: &CmdResult) -> Vec<StreamKind> {
    result.outputs.iter().filter_map(|o| o.stream_kind()).collect()
}

#[tokio::test]
async fn stream_that_closes_first_is_reported_first() -> TestResult {
    with_timeout(async {
        init_tracing();

        let script = "echo e 1>&2; exec 2>&-; sleep 0.2; echo o";
        let result = run(quiet(CmdDesc::new("sh").with_args(vec!["-c", script]))).await;

        assert!(result.success);
        assert_eq!(stream_order(&result), vec![StreamKind::Stderr, StreamKind::Stdout]);

        let script = "echo o; exec 1>&-; sleep 0.2; echo e 1>&2";
        let result = run(quiet(CmdDesc::new("sh").with_args(vec!["-c", script]))).await;

        assert!(result.success);
        assert_eq!(stream_order(&result), vec![StreamKind::Stdout, StreamKind::Stderr]);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn empty_stream_produces_no_event() -> TestResult {
    with_timeout(async {
        init_tracing();

        let result = run(quiet(CmdDesc::from_line("echo only-stdout"))).await;

        assert_eq!(result.outputs.len(), 1);
        assert_eq!(result.outputs[0].stream_kind(), Some(StreamKind::Stdout));
        assert_eq!(result.outputs[0].text(), "only-stdout\n");
        Ok(())
    })
    .await
}

#[tokio::test]
async fn slow_chunked_output_is_fully_drained() -> TestResult {
    with_timeout_secs(20, async {
        init_tracing();

        let script = slow_lines_script(10, "0.05");
        for _ in 0..3 {
            let desc = CmdDesc::new("sh").with_args(vec!["-c", script.as_str()]);
            let result = run(quiet(desc)).await;

            assert!(result.success);
            for i in 1..=10 {
                assert!(
                    result.stdout.contains(&format!("line {i}\n")),
                    "missing line {i} in {:?}",
                    result.stdout
                );
            }
            assert!(!result.outputs.is_empty());
        }
        Ok(())
    })
    .await
}

#[tokio::test]
async fn output_written_right_before_exit_is_not_lost() -> TestResult {
    with_timeout_secs(20, async {
        init_tracing();

        // Large final burst on both streams, then exit immediately.
        let script = "i=0; while [ $i -lt 2000 ]; do \
                      echo \"row $i\"; echo \"err $i\" 1>&2; i=$((i+1)); \
                      done";
        let result = run(quiet(CmdDesc::new("sh").with_args(vec!["-c", script]))).await;

        assert!(result.success);
        assert_eq!(result.stdout.lines().count(), 2000);
        assert_eq!(result.stderr.lines().count(), 2000);
        assert!(result.stdout.ends_with("row 1999\n"));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn explicit_cwd_is_used() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let canonical = std::fs::canonicalize(dir.path())?;

        let result = run(quiet(CmdDesc::new("pwd").with_cwd(dir.path()))).await;

        assert!(result.success);
        assert_eq!(result.stdout.trim_end(), canonical.display().to_string());
        assert_eq!(result.cwd, dir.path());
        Ok(())
    })
    .await
}

#[tokio::test]
async fn description_override_replaces_invocation_text() -> TestResult {
    with_timeout(async {
        init_tracing();

        let desc = quiet(CmdDesc::from_line("echo hi").with_description("say hi"));
        let result = run(desc).await;

        assert_eq!(result.description, "say hi");
        assert!(result.summary().starts_with("✔ say hi (exit 0,"));
        Ok(())
    })
    .await
}

#[test]
fn sudo_modes_shape_the_invocation() {
    let args = vec!["install".to_string(), "-y".to_string()];

    let direct = Invocation::build("apt-get", &args, SudoMode::None, "sudo");
    assert_eq!(direct.argv(), vec!["apt-get", "install", "-y"]);
    assert_eq!(direct.stdin, StdinMode::Null);

    let interactive = Invocation::build("apt-get", &args, SudoMode::Interactive, "sudo");
    assert_eq!(interactive.to_string(), "sudo apt-get install -y");
    assert_eq!(interactive.stdin, StdinMode::Inherit);

    let no_prompt = Invocation::build("apt-get", &args, SudoMode::NoPrompt, "doas");
    assert_eq!(no_prompt.program, "doas");
    assert_eq!(no_prompt.args, vec!["-n", "apt-get", "install", "-y"]);
    assert_eq!(no_prompt.stdin, StdinMode::Null);
}

#[test]
fn cmd_snapshot_carries_its_knobs() {
    let mut cmd = Cmd::new("ls", vec!["-la"]);
    assert_eq!(cmd.desc().quiet, None);
    assert_eq!(cmd.desc().cwd, None);

    cmd.opts_mut().set_quiet(true);
    cmd.opts_mut().set_cwd("/tmp");
    cmd.opts_mut().sudo_mode = SudoMode::Interactive;

    let desc = cmd.desc();
    assert_eq!(desc.cmd, "ls");
    assert_eq!(desc.quiet, Some(true));
    assert_eq!(desc.cwd.as_deref(), Some(std::path::Path::new("/tmp")));
    assert_eq!(desc.sudo_mode, SudoMode::Interactive);

    let rebuilt = Cmd::from_desc(desc.clone());
    assert_eq!(rebuilt.desc(), desc);
    assert_eq!(Cmd::from_line("git status -s").desc().args.to_vec(), vec!["status", "-s"]);
}

async fn cancelled_task_error() -> tokio::task::JoinError {
    let task = tokio::spawn(std::future::pending::<()>());
    task.abort();
    match task.await {
        Err(e) => e,
        Ok(()) => unreachable!("pending task cannot finish"),
    }
}

#[tokio::test]
async fn lost_output_drain_fails_a_clean_exit() -> TestResult {
    with_timeout(async {
        init_tracing();

        let mut draft = CmdResultDraft::new("echo hi", CmdArgs::default());
        let fault = cancelled_task_error().await;
        settle_exit(&mut draft, "echo", Ok(ExitStatus::from_raw(0)), Some(fault));
        let result = draft.finalize();

        assert!(!result.success);
        assert_eq!(result.exit_code, -1);
        assert!(matches!(
            result.error.as_deref(),
            Some(CmdError::Drain { program, .. }) if program == "echo"
        ));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn exit_status_is_settled_without_drain_faults() -> TestResult {
    with_timeout(async {
        init_tracing();

        let mut draft = CmdResultDraft::new("true", CmdArgs::default());
        settle_exit(&mut draft, "true", Ok(ExitStatus::from_raw(0)), None);
        let result = draft.finalize();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);

        // Raw wait status: exit code 3 sits in the high byte.
        let mut draft = CmdResultDraft::new("false", CmdArgs::default());
        settle_exit(&mut draft, "false", Ok(ExitStatus::from_raw(3 << 8)), None);
        let result = draft.finalize();
        assert!(!result.success);
        assert_eq!(result.exit_code, 3);
        assert!(result.error.is_none());

        let mut draft = CmdResultDraft::new("sleep", CmdArgs::default());
        let lost = io::Error::other("no child");
        settle_exit(&mut draft, "sleep", Err(lost), None);
        let result = draft.finalize();
        assert!(!result.success);
        assert_eq!(result.exit_code, -1);
        assert!(matches!(result.error.as_deref(), Some(CmdError::Wait { .. })));
        Ok(())
    })
    .await
}
