//! Logging setup.
//!
//! Diagnostics go to stderr through `tracing`. The level comes from `RUST_LOG`
//! when set, otherwise from the default passed to [`init`]. Interactive output
//! (banners, prompts) is printed directly and does not go through here.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Level used when `RUST_LOG` is not set.
pub const DEFAULT_LEVEL: &str = "warn";

/// Initialize the global subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}

/// Initialize logging for tests (captured by the test harness).
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .with_span_events(FmtSpan::CLOSE)
        .try_init();
}
