use thiserror::Error;

use market::ratio::{DEFAULT_TOLERANCE, RatioBand};

use crate::cli::Cli;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("tolerance must be a finite, non-negative number, got {0}")]
    InvalidTolerance(f64),

    #[error("channel capacity must be at least 1")]
    ZeroCapacity,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Half-width of the alert band around 1.0.
    ///
    /// Only changes alert sensitivity; prices and ratio are unaffected.
    pub tolerance: f64,

    /// Pause between replayed quote pairs. 0 disables pacing.
    pub feed_interval_ms: u64,

    /// Capacity of the feed -> graph channel.
    ///
    /// Acts as backpressure: a slow widget blocks the feed instead of
    /// buffering without bound.
    pub channel_capacity: usize,

    /// JSON log output instead of the pretty format.
    pub json_logs: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            feed_interval_ms: 0,
            channel_capacity: 64,
            json_logs: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("RATIO_TOLERANCE") {
            cfg.tolerance = parse("RATIO_TOLERANCE", v)?;
        }
        if let Some(v) = lookup("RATIO_FEED_INTERVAL_MS") {
            cfg.feed_interval_ms = parse("RATIO_FEED_INTERVAL_MS", v)?;
        }
        if let Some(v) = lookup("RATIO_CHANNEL_CAPACITY") {
            cfg.channel_capacity = parse("RATIO_CHANNEL_CAPACITY", v)?;
        }
        cfg.json_logs = lookup("APP_ENV").is_some_and(|v| v == "production");

        cfg.validate()?;
        Ok(cfg)
    }

    /// Command-line flags win over the environment.
    pub fn apply_cli(&mut self, cli: &Cli) -> Result<(), ConfigError> {
        if let Some(t) = cli.tolerance {
            self.tolerance = t;
        }
        if let Some(ms) = cli.interval_ms {
            self.feed_interval_ms = ms;
        }
        self.json_logs |= cli.json_logs;

        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    pub fn band(&self) -> RatioBand {
        RatioBand::new(self.tolerance)
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use clap::Parser;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.band(), RatioBand::default());
        assert_eq!(cfg.band().upper(), 1.10);
    }

    #[test]
    fn reads_environment_values() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("RATIO_TOLERANCE", "0.05"),
            ("RATIO_FEED_INTERVAL_MS", " 250 "),
            ("RATIO_CHANNEL_CAPACITY", "8"),
            ("APP_ENV", "production"),
        ]))
        .unwrap();

        assert_eq!(cfg.tolerance, 0.05);
        assert_eq!(cfg.feed_interval_ms, 250);
        assert_eq!(cfg.channel_capacity, 8);
        assert!(cfg.json_logs);
    }

    #[test]
    fn rejects_unparsable_values() {
        let err = AppConfig::from_lookup(lookup(&[("RATIO_TOLERANCE", "ten percent")])).unwrap_err();

        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "RATIO_TOLERANCE",
                value: "ten percent".into()
            }
        );
    }

    #[test]
    fn rejects_negative_or_non_finite_tolerance() {
        for bad in ["-0.1", "NaN", "inf"] {
            let err = AppConfig::from_lookup(lookup(&[("RATIO_TOLERANCE", bad)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidTolerance(_)), "{bad}");
        }
    }

    #[test]
    fn rejects_zero_capacity() {
        let err = AppConfig::from_lookup(lookup(&[("RATIO_CHANNEL_CAPACITY", "0")])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroCapacity);
    }

    #[test]
    fn cli_flags_override_environment() {
        let mut cfg = AppConfig::from_lookup(lookup(&[("RATIO_TOLERANCE", "0.05")])).unwrap();
        let cli = Cli::parse_from([
            "ratio-graph",
            "--input",
            "quotes.jsonl",
            "--tolerance",
            "0.2",
            "--interval-ms",
            "10",
            "--json-logs",
        ]);

        cfg.apply_cli(&cli).unwrap();

        assert_eq!(cfg.tolerance, 0.2);
        assert_eq!(cfg.feed_interval_ms, 10);
        assert!(cfg.json_logs);
    }

    #[test]
    fn cli_tolerance_is_validated() {
        let mut cfg = AppConfig::default();
        let cli = Cli::parse_from(["ratio-graph", "-i", "q.jsonl", "--tolerance=-1"]);

        assert_eq!(cfg.apply_cli(&cli), Err(ConfigError::InvalidTolerance(-1.0)));
    }
}
