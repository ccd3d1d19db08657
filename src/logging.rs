//! Diagnostic tracing, separate from the transcript.
//!
//! The transcript goes to stdout; tracing goes to stderr and is filtered
//! with `RUST_LOG` (default `warn`), e.g. `RUST_LOG=ledgermain=debug`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
