//! Logging initialization.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LogFormat, LoggingConfig};

/// Default filter directive when `RUST_LOG` is not set.
///
/// `-v` wins over the run-mode toggle, which wins over `logging.level`.
#[must_use]
pub fn default_directive(cfg: &LoggingConfig, verbose: u8, debug: bool) -> String {
    match verbose {
        0 if debug => "debug".to_owned(),
        0 => cfg.level.trim().to_owned(),
        1 => "info".to_owned(),
        2 => "debug".to_owned(),
        _ => "trace".to_owned(),
    }
}

/// Install the global subscriber. Events go to stderr so stdout stays
/// reserved for command output.
///
/// # Errors
/// Returns an error if the directive is invalid or a global subscriber is
/// already installed.
pub fn init_logging(cfg: &LoggingConfig, verbose: u8, debug: bool) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive(cfg, verbose, debug))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    match cfg.format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .flatten_event(true),
            )
            .try_init()?,
    }
    Ok(())
}
