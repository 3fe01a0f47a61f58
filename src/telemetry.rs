//! Tracing initialization.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter when `RUST_LOG` is unset. Warnings only, so fetch
/// failures show up without drowning the countdown.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Initialize the global tracing subscriber with an env filter.
///
/// Use RUST_LOG to configure, e.g.:
/// RUST_LOG=tradefloor=debug,reqwest=info
pub fn init() {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
