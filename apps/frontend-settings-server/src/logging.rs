use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Picks the filter: `-v` flags, then `RUST_LOG`, then `logging.level`.
fn env_filter(cfg: &LoggingConfig, verbose: u8) -> Result<EnvFilter> {
    if verbose == 0
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return Ok(filter);
    }
    EnvFilter::try_new(&cfg.level).map_err(|e| anyhow!("invalid logging.level: {e}"))
}

/// Installs the global subscriber. Logs go to stderr so stdout stays free for
/// `--print-config` and `check` output.
///
/// # Errors
/// Fails on an invalid filter or when a subscriber is already installed.
pub fn init_logging(cfg: &LoggingConfig, verbose: u8) -> Result<()> {
    let filter = env_filter(cfg, verbose)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    match cfg.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().flatten_event(true).try_init(),
    }
    .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}
