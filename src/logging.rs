//! Tracing setup for the binary and for tests.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// The configured level is the default filter; `RUST_LOG` takes precedence
/// when set, so operators can narrow filtering to specific targets without
/// touching the configuration file.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // try_init so tests and libraries can call this more than once
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
