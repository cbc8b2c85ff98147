//! Diagnostic logging setup.

use eyre::{Result, eyre};
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber.
///
/// `verbose` selects `debug` over `warn`; `RUST_LOG` overrides both.
pub fn init(verbose: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| eyre!("failed to initialize logging: {e}"))
}
