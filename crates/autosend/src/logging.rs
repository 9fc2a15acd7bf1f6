use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::ConfigError;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set. Returns an error
/// instead of panicking if a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ConfigError::Invalid(format!("logging.level: {e}")))?;

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };

    result.map_err(|e| ConfigError::Logging(e.to_string()))
}
