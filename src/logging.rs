use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use crate::stderr_buffer::BufferedStderr;

/// Default filter when RUST_LOG is unset
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "business_mri=debug,warn"
    } else {
        "warn"
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `--verbose`. Output goes through the stderr buffer so
/// lines logged while the TUI owns the terminal are printed after it exits.
pub fn init(verbose: bool) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter(verbose))
            .map_err(|e| anyhow!("invalid log filter: {}", e))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .with_writer(BufferedStderr::default)
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {}", e))
}
