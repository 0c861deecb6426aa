// tests/common.rs
//! Shared test logging — enabled with `--features logging`

#[cfg(feature = "logging")]
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Route vault logs to the test writer; respects RUST_LOG, defaults to debug.
/// Idempotent — safe to call from every test.
#[allow(dead_code)]
pub fn setup() {
    #[cfg(feature = "logging")]
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shadow_vault=debug")),
        )
        .try_init()
        .ok();
}
