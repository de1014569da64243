pub mod builders;
pub mod fake_unit;

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// Logs go through `with_test_writer()`, so the harness only shows them for
/// failing tests (unless run with `-- --nocapture`). Pick the level with
/// `RUST_LOG`, e.g. `RUST_LOG=debug`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Run a future with a 5-second timeout.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    with_timeout_secs(5, f).await
}

/// Run a future with a custom timeout, for tests that spawn slow processes.
pub async fn with_timeout_secs<F, T>(secs: u64, f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(secs), f)
        .await
        .unwrap_or_else(|_| panic!("Test timed out after {secs} seconds"))
}
