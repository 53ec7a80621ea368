//! Logging setup

use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Install a stderr subscriber for the given verbosity
///
/// `RUST_LOG` takes precedence when set. Installing twice is a no-op.
pub fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity.is_debug())
        .try_init();
}
