//! Process-wide tracing setup for binaries embedding the flow.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a JSON subscriber; `RUST_LOG` wins over `default_filter`.
///
/// Panics if a global subscriber is already installed.
pub fn init_json_tracing(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false)
        .json()
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
