//! Logging setup
//!
//! Log output always goes to stderr so stdout stays machine-readable.

use std::{io, sync::Once};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

/// Environment variable holding the log filter, checked before `RUST_LOG`
pub const LOG_ENV: &str = "BRANCH_SUGGEST_LOG";

const DEFAULT_FILTER: &str = "warn";

static INIT: Once = Once::new();

/// Initialize the global subscriber. Later calls are no-ops.
pub fn init(format: LogFormat) {
    INIT.call_once(|| {
        let filter = create_env_filter();

        match format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(fmt::layer().json().with_target(true).with_writer(io::stderr))
                    .with(filter)
                    .init();
            }
            LogFormat::Text => {
                tracing_subscriber::registry()
                    .with(fmt::layer().with_target(false).with_writer(io::stderr))
                    .with(filter)
                    .init();
            }
        }

        tracing::debug!(?format, "logging initialized");
    });
}

/// Filter from `BRANCH_SUGGEST_LOG`, then `RUST_LOG`, then the default level
pub fn create_env_filter() -> EnvFilter {
    if let Ok(spec) = std::env::var(LOG_ENV) {
        EnvFilter::try_new(&spec).unwrap_or_else(|_| {
            eprintln!(
                "Invalid {} specification '{}', using default '{}'",
                LOG_ENV, spec, DEFAULT_FILTER
            );
            EnvFilter::new(DEFAULT_FILTER)
        })
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    #[serial]
    fn test_filter_from_own_variable() {
        std::env::set_var(LOG_ENV, "debug");
        let filter = create_env_filter();
        std::env::remove_var(LOG_ENV);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    #[serial]
    fn test_default_filter() {
        std::env::remove_var(LOG_ENV);
        std::env::remove_var("RUST_LOG");
        let filter = create_env_filter();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    #[serial]
    fn test_init_is_idempotent() {
        init(LogFormat::Text);
        init(LogFormat::Json);
    }
}
