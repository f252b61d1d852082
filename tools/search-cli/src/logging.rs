//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level; `--verbose` raises the default
/// to `debug`. Logs go to stderr so JSON results on stdout stay parseable.
pub fn init(config: &LoggingConfig, verbose: bool) {
    let default_level = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // Repeated initialization is a no-op.
    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}
