//! Tracing setup shared by every Switchboard binary.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV_VAR: &str = "SWITCHBOARD_LOG";

/// Install the global subscriber. `SWITCHBOARD_LOG` wins over the configured
/// level. Safe to call more than once; later calls are ignored.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(config.effective_level()));

    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let _ = if config.effective_json() {
        builder.json().try_init()
    } else {
        builder.with_target(false).try_init()
    };
}
