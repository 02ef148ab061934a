//! # Logging Setup
//!
//! ```text
//! RUST_LOG (valid directives) ──┐
//!                               ├──► EnvFilter ──► fmt subscriber
//! [logging] filter / LEDGER_LOG ┘   (first wins)
//! ```

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=ledger=trace` - Show trace for ledger crates only
/// - Default: `default_filter` (from `[logging] filter` in the config,
///   which `LEDGER_LOG` overrides)
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_logging(default_filter: &str) -> bool {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    install(build_filter(default_filter, rust_log.as_deref()))
}

/// Picks `RUST_LOG` when it parses, otherwise the configured filter.
pub fn build_filter(default_filter: &str, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_filter))
}

fn install(filter: EnvFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::{Layer, Registry};

    fn max_level(filter: &EnvFilter) -> Option<LevelFilter> {
        <EnvFilter as Layer<Registry>>::max_level_hint(filter)
    }

    #[test]
    fn test_configured_filter_is_used() {
        assert_eq!(max_level(&build_filter("error", None)), Some(LevelFilter::ERROR));

        let config = LedgerConfig::default();
        assert_eq!(
            max_level(&build_filter(&config.logging.filter, None)),
            Some(LevelFilter::DEBUG)
        );
    }

    #[test]
    fn test_ledger_log_reaches_filter() {
        let mut config = LedgerConfig::default();
        config.apply_overrides(|key| (key == "LEDGER_LOG").then(|| "warn".to_string()));
        assert_eq!(
            max_level(&build_filter(&config.logging.filter, None)),
            Some(LevelFilter::WARN)
        );
    }

    #[test]
    fn test_rust_log_wins_when_valid() {
        assert_eq!(
            max_level(&build_filter("error", Some("ledger=trace"))),
            Some(LevelFilter::TRACE)
        );
        assert_eq!(
            max_level(&build_filter("warn", Some("ledger=loud"))),
            Some(LevelFilter::WARN)
        );
    }

    // Only test in this binary that installs a global subscriber.
    #[test]
    fn test_installed_subscriber_honors_filter() {
        assert!(install(build_filter("error", None)));
        assert_eq!(LevelFilter::current(), LevelFilter::ERROR);
        assert!(!tracing::enabled!(tracing::Level::INFO));
        assert!(!install(build_filter("trace", None)));
    }
}
