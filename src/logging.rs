//! Diagnostic logging setup.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive, e.g. `SHRUB_LOG=shrub=debug`.
pub const LOG_ENV: &str = "SHRUB_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Installs a compact stderr subscriber. Silent at the default level so the
/// terminal only shows command output.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .try_init();
}
