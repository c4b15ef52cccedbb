//! Logging setup for reporting processes.
//!
//! The configured level applies to the `p3a_*` crates only. Everything else
//! stays at `warn` unless `RUST_LOG` says otherwise, so a debug run shows
//! formatting and anonymization decisions without config-loader noise.

use log::LevelFilter;

use crate::error::CoreError;

/// Crates whose records follow `global.log_level`.
pub const REPORTING_MODULES: &[&str] = &[
    "p3a_core",
    "p3a_message",
    "p3a_client",
    "p3a_interfaces",
];

/// Parses a configured level name. Unknown names fall back to `Info`.
pub fn parse_level(log_level_str: &str) -> LevelFilter {
    log_level_str.trim().parse().unwrap_or_else(|_| {
        log::warn!("Unknown log level '{}', using info", log_level_str);
        LevelFilter::Info
    })
}

/// `RUST_LOG`-style directives equivalent to `level` for the reporting crates.
pub fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    let mut directives = vec!["warn".to_string()];
    directives.extend(
        REPORTING_MODULES
            .iter()
            .map(|module| format!("{}={}", module, level)),
    );
    directives.join(",")
}

#[cfg(feature = "env_logger")]
pub fn setup_logging(log_level_str: &str) -> Result<(), CoreError> {
    use env_logger::{Builder, Env};

    let directives = default_directives(parse_level(log_level_str));
    Builder::from_env(Env::default().default_filter_or(directives))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| CoreError::LoggingSetup(e.to_string()))
}

#[cfg(not(feature = "env_logger"))]
pub fn setup_logging(log_level_str: &str) -> Result<(), CoreError> {
    // The host process owns the logger; only validate the level.
    log::debug!(
        "env_logger feature disabled, leaving logger to the host (requested level {})",
        parse_level(log_level_str)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(parse_level("verbose"), LevelFilter::Info);
    }

    #[test]
    fn directives_scope_level_to_reporting_crates() {
        assert_eq!(
            default_directives(LevelFilter::Trace),
            "warn,p3a_core=trace,p3a_message=trace,p3a_client=trace,p3a_interfaces=trace"
        );
    }
}
