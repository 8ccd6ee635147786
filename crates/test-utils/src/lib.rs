//! Shared helpers for `shellstate` integration tests.

pub mod builders;
pub mod scripted_backend;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

/// Upper bound for any single test future. Real-shell tests spawn processes,
/// so this is generous.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(30);

static INIT: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
///
/// Output is captured by the harness and only shown for failing tests.
/// `RUST_LOG=shellstate=debug cargo test` shows phase and stream logs.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("shellstate=info"));
        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

/// Await `f`, panicking if it takes longer than [`TEST_TIMEOUT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(TEST_TIMEOUT, f).await {
        Ok(value) => value,
        Err(_) => panic!("test did not finish within {TEST_TIMEOUT:?}"),
    }
}
