//! Test logging for unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Quiet by default; sqlx statement logs stay off unless asked for.
const DEFAULT_FILTER: &str = "warn,sqlx=error";

/// Install a test-friendly subscriber once per process.
///
/// Filter precedence: `TEST_LOG`, then `RUST_LOG`, then [`DEFAULT_FILTER`].
/// Safe to call from every test; later calls are no-ops.
///
/// ```bash
/// TEST_LOG=db_infra=info,lookup_demo=debug cargo test -- --nocapture
/// ```
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_target(true)
            .try_init()
            .ok();
    });
}
