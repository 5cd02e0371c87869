//! Diagnostic logging behind `--debug`.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "terryann=debug";

/// Install a stderr subscriber. `RUST_LOG` takes precedence over the default
/// crate-level directive when set.
pub fn init_debug_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
