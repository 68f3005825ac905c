//! Configuration Module
//!
//! Handles loading cache construction settings from environment variables.

use std::env;

/// Cache construction parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of slots pre-allocated by each new cache. Never a bound.
    pub initial_capacity: usize,
    /// Whether caches count hits, misses and failed computations
    pub record_stats: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MEMO_INITIAL_CAPACITY` - Capacity hint for new caches (default: 0)
    /// - `MEMO_RECORD_STATS` - Record hit/miss statistics (default: true)
    pub fn from_env() -> Self {
        Self {
            initial_capacity: env::var("MEMO_INITIAL_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            record_stats: env::var("MEMO_RECORD_STATS")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(true),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            record_stats: true,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.initial_capacity, 0);
        assert!(config.record_stats);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("MEMO_INITIAL_CAPACITY");
        env::remove_var("MEMO_RECORD_STATS");

        let config = Config::from_env();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
