//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use agency_core::pricing::{PricingPolicy, Rounding};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// Upper bound for `QUOTE_VALIDITY_DAYS`, ten years.
const MAX_QUOTE_VALIDITY_DAYS: u32 = 3650;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// Without a key every completion fails and all content comes from the fallback generator.
    pub openai_api_key: Option<String>,
    pub completion_model: String,
    pub completion_timeout: Duration,
    pub pricing: PricingPolicy,
    /// `None` allows any origin.
    pub cors_origin: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            log_level: Level::INFO,
            openai_api_key: None,
            completion_model: "gpt-3.5-turbo".to_string(),
            completion_timeout: Duration::from_secs(15),
            pricing: PricingPolicy::default(),
            cors_origin: None,
        }
    }
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string()))
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // --- Server Settings ---
        let bind_address = match lookup("BIND_ADDRESS") {
            Some(raw) => parse_var::<SocketAddr>("BIND_ADDRESS", &raw)?,
            None => defaults.bind_address,
        };

        let log_level = match lookup("RUST_LOG") {
            Some(raw) => raw.trim().parse::<Level>().map_err(|_| {
                ConfigError::InvalidValue(
                    "RUST_LOG".to_string(),
                    format!("'{}' is not a valid log level", raw),
                )
            })?,
            None => defaults.log_level,
        };

        let cors_origin = lookup("CORS_ORIGIN").filter(|origin| !origin.trim().is_empty());

        // --- Completion Service ---
        let openai_api_key = lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty());
        let completion_model = lookup("COMPLETION_MODEL").unwrap_or(defaults.completion_model);
        let completion_timeout = match lookup("COMPLETION_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_var::<u64>("COMPLETION_TIMEOUT_SECS", &raw)?),
            None => defaults.completion_timeout,
        };

        // --- Pricing ---
        let mut pricing = defaults.pricing;
        if let Some(raw) = lookup("QUOTE_ROUNDING") {
            pricing.rounding = parse_var::<Rounding>("QUOTE_ROUNDING", &raw)?;
        }
        if let Some(raw) = lookup("QUOTE_VALIDITY_DAYS") {
            let days = parse_var::<u32>("QUOTE_VALIDITY_DAYS", &raw)?;
            if days == 0 || days > MAX_QUOTE_VALIDITY_DAYS {
                return Err(ConfigError::InvalidValue(
                    "QUOTE_VALIDITY_DAYS".to_string(),
                    format!("{} is outside 1..={}", days, MAX_QUOTE_VALIDITY_DAYS),
                ));
            }
            pricing.validity_days = days;
        }

        Ok(Self {
            bind_address,
            log_level,
            openai_api_key,
            completion_model,
            completion_timeout,
            pricing,
            cors_origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bind_address.port(), 3000);
        assert_eq!(config.completion_model, "gpt-3.5-turbo");
        assert_eq!(config.completion_timeout, Duration::from_secs(15));
        assert_eq!(config.pricing.rounding, Rounding::Unit);
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("BIND_ADDRESS", "127.0.0.1:8080"),
            ("OPENAI_API_KEY", "sk-test"),
            ("COMPLETION_TIMEOUT_SECS", "5"),
            ("QUOTE_ROUNDING", "fifty"),
            ("QUOTE_VALIDITY_DAYS", "14"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address.port(), 8080);
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.completion_timeout, Duration::from_secs(5));
        assert_eq!(config.pricing.rounding, Rounding::Fifty);
        assert_eq!(config.pricing.validity_days, 14);
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn rejects_bad_values() {
        let err = Config::from_lookup(lookup_from(&[("QUOTE_ROUNDING", "tenth")])).unwrap_err();
        assert!(err.to_string().contains("QUOTE_ROUNDING"));

        let err = Config::from_lookup(lookup_from(&[("BIND_ADDRESS", "nowhere")])).unwrap_err();
        assert!(err.to_string().contains("BIND_ADDRESS"));

        for days in ["0", "3651", "99999999999", "-1"] {
            let err =
                Config::from_lookup(lookup_from(&[("QUOTE_VALIDITY_DAYS", days)])).unwrap_err();
            assert!(err.to_string().contains("QUOTE_VALIDITY_DAYS"));
        }
    }
}
