// tests/builtin_files.rs
mod common;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use cmdseq::fs::mock::MockFileSystem;
use cmdseq::{
    read_text_file, write_text_file, Cmd, CmdError, CmdOutput, CmdReadTextFile, CmdWriteTextFile,
    Runnable,
};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn reading_twice_gives_identical_stdout() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "first line\nsecond line ✓\n")?;

        let mut unit = Cmd::read_text_file(&path);
        unit.opts_mut().set_quiet(true);

        let first = unit.run().await;
        let second = unit.run().await;

        assert!(first.success);
        assert_eq!(first.exit_code, 0);
        assert_eq!(first.stdout, "first line\nsecond line ✓\n");
        assert_eq!(first.stdout, second.stdout);
        assert_eq!(
            first.parsed_args,
            vec![std::fs::canonicalize(&path)?.display().to_string()]
        );
        Ok(())
    })
    .await
}

#[tokio::test]
async fn read_logs_running_and_succeeded() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "x")?;

        let mut unit = CmdReadTextFile::new(&path);
        unit.opts_mut().set_quiet(true);
        let result = unit.run().await;

        let description = format!("READ TEXT FILE: {}", path.display());
        assert_eq!(result.description, description);
        assert_eq!(
            result.outputs,
            vec![
                CmdOutput::info(format!("RUNNING: {description}")),
                CmdOutput::info(format!("SUCCEEDED: {description}")),
            ]
        );
        Ok(())
    })
    .await
}

#[tokio::test]
async fn reading_a_missing_file_fails_with_message() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("missing.txt");

        let mut unit = CmdReadTextFile::new(&path);
        unit.opts_mut().set_quiet(true);
        let result = unit.run().await;

        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
        assert_eq!(result.stdout, "");
        assert!(result
            .stderr
            .starts_with(&format!("Error reading from {}:", path.display())));
        assert!(result.stderr.contains("No such file or directory"));
        assert!(matches!(
            result.error.as_deref(),
            Some(CmdError::FileSystem { op: "read", .. })
        ));
        assert!(matches!(
            result.outputs.last(),
            Some(CmdOutput::Info { text }) if text.starts_with("FAILED: ")
        ));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn writing_reports_characters_and_canonical_path() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.txt");

        let mut unit = CmdWriteTextFile::new(&path, "héllo");
        unit.opts_mut().set_quiet(true);
        let result = unit.run().await;

        let canonical = std::fs::canonicalize(&path)?;
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
        assert_eq!(
            result.stdout,
            format!("Wrote 5 characters to {}", canonical.display())
        );
        assert_eq!(std::fs::read_to_string(&path)?, "héllo");
        Ok(())
    })
    .await
}

#[tokio::test]
async fn writing_over_a_directory_fails() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;

        let mut unit = CmdWriteTextFile::new(dir.path(), "nope");
        unit.opts_mut().set_quiet(true);
        let result = unit.run().await;

        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
        assert!(result
            .stderr
            .starts_with(&format!("Error writing to {}:", dir.path().display())));
        assert!(matches!(
            result.error.as_deref(),
            Some(CmdError::FileSystem { op: "write", .. })
        ));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn free_functions_round_trip_through_disk() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("round.txt");

        let written = write_text_file(&path, "payload").await;
        assert!(written.success);

        let read = read_text_file(&path).await;
        assert!(read.success);
        assert_eq!(read.stdout, "payload");
        Ok(())
    })
    .await
}

#[tokio::test]
async fn mock_file_system_backs_read_and_write() -> TestResult {
    with_timeout(async {
        init_tracing();

        let fs = MockFileSystem::new();
        fs.add_file("/work/in.txt", "from mock");
        let shared = Arc::new(fs.clone());

        let mut read = CmdReadTextFile::new("/work/in.txt").with_fs(shared.clone());
        read.opts_mut().set_quiet(true);
        let result = read.run().await;
        assert!(result.success);
        assert_eq!(result.stdout, "from mock");

        let mut write = CmdWriteTextFile::new("/work/out.txt", "abc").with_fs(shared.clone());
        write.opts_mut().set_quiet(true);
        let result = write.run().await;
        assert!(result.success);
        assert_eq!(result.stdout, "Wrote 3 characters to /work/out.txt");
        assert_eq!(fs.contents("/work/out.txt").as_deref(), Some("abc"));
        assert_eq!(fs.writes(), vec![Path::new("/work/out.txt").to_path_buf()]);

        let mut orphan = CmdWriteTextFile::new("/nowhere/out.txt", "abc").with_fs(shared);
        orphan.opts_mut().set_quiet(true);
        let result = orphan.run().await;
        assert!(!result.success);
        assert!(fs.contents("/nowhere/out.txt").is_none());
        Ok(())
    })
    .await
}
