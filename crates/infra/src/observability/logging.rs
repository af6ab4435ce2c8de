//! Tracing subscriber setup for applications embedding the SDK.

use greenloop_domain::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`. Returns `false` when a
/// global subscriber was already installed; the call is then a no-op.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let filter = filter_for(config);

    let installed = if config.json {
        tracing_subscriber::fmt().json().with_target(true).with_env_filter(filter).try_init()
    } else {
        tracing_subscriber::fmt().with_target(true).with_env_filter(filter).try_init()
    };

    installed.is_ok()
}

fn filter_for(config: &LoggingConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::try_new(config.level.trim().to_ascii_lowercase())
        .unwrap_or_else(|_| EnvFilter::new(greenloop_domain::constants::DEFAULT_LOG_LEVEL))
}
