// tests/cmd_fn.rs
mod common;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::bail;
use cmdseq::{CmdError, CmdFn, CmdOutput, CmdSeq, Runnable, SeqEntry, StreamKind};

type TestResult = Result<(), Box<dyn Error>>;

fn quiet(mut unit: CmdFn) -> CmdFn {
    unit.opts_mut().set_quiet(true);
    unit
}

#[tokio::test]
async fn successful_body_records_output_and_events() -> TestResult {
    with_timeout(async {
        init_tracing();

        let mut unit = quiet(CmdFn::new("GREET", |ctx| {
            assert!(ctx.quiet());
            ctx.stdout("hello");
            ctx.print(StreamKind::Stderr, "careful");
            ctx.info("halfway");
            Ok(())
        }));

        let result = unit.run().await;

        assert!(result.success);
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout, "hello");
        assert_eq!(result.stderr, "careful");
        assert_eq!(result.description, "GREET");
        assert_eq!(
            result.outputs,
            vec![
                CmdOutput::info("RUNNING: GREET"),
                CmdOutput::info("halfway"),
                CmdOutput::info("SUCCEEDED: GREET"),
            ]
        );
        Ok(())
    })
    .await
}

#[tokio::test]
async fn error_from_body_fails_the_unit() -> TestResult {
    with_timeout(async {
        init_tracing();

        let mut unit = quiet(CmdFn::new("CHECK", |_ctx| bail!("disk is full")));
        let result = unit.run().await;

        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
        assert_eq!(result.stderr, "FAILED: disk is full");
        assert!(matches!(result.error.as_deref(), Some(CmdError::Unit(_))));
        assert_eq!(result.outputs.last(), Some(&CmdOutput::info("FAILED: CHECK")));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn panicking_body_is_reported_as_failure() -> TestResult {
    with_timeout(async {
        init_tracing();

        let mut unit = quiet(CmdFn::new("EXPLODE", |_ctx| panic!("kaboom")));
        let result = unit.run().await;

        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("panicked: kaboom"));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn body_runs_once_per_run() -> TestResult {
    with_timeout(async {
        init_tracing();

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut unit = quiet(CmdFn::new("COUNT", move |ctx| {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            ctx.stdout(&n.to_string());
            Ok(())
        }));

        assert_eq!(unit.run().await.stdout, "1");
        assert_eq!(unit.run().await.stdout, "2");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn failing_function_stops_a_sequence() -> TestResult {
    with_timeout(async {
        init_tracing();

        let mut seq = CmdSeq::new(vec![
            SeqEntry::from("echo before"),
            SeqEntry::from(CmdFn::new("GATE", |_ctx| bail!("not ready"))),
            SeqEntry::from("echo after"),
        ]);
        seq.opts_mut().set_quiet(true);

        let result = seq.run().await;

        assert!(!result.success);
        assert_eq!(result.results.len(), 2);
        assert_eq!(result.stdout, "before\n");
        assert_eq!(result.stderr, "FAILED: not ready");
        assert!(result.results[1].quiet);
        Ok(())
    })
    .await
}
