use std::ops::RangeInclusive;

use anyhow::{bail, Context, Result};

/// Accepted values for `FIRST_VISIT_DUE_DAYS`, up to ten years.
pub const FIRST_VISIT_DUE_DAYS_RANGE: RangeInclusive<i64> = 0..=3650;

/// Application configuration loaded from environment variables.
/// Every setting has a default, so a bare environment boots the seeded demo.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Advisor suggestions fall back to the static error text when unset.
    pub anthropic_api_key: Option<String>,
    /// Artificial latency applied before each write, mimicking a remote backend.
    pub simulated_write_delay_ms: u64,
    /// Days between registration and the first-visit deadline.
    pub first_visit_due_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            anthropic_api_key: None,
            simulated_write_delay_ms: 0,
            first_visit_due_days: 7,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            port: parse_env("PORT", defaults.port).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            simulated_write_delay_ms: parse_env(
                "SIMULATED_WRITE_DELAY_MS",
                defaults.simulated_write_delay_ms,
            )
            .context("SIMULATED_WRITE_DELAY_MS must be a number of milliseconds")?,
            first_visit_due_days: parse_env("FIRST_VISIT_DUE_DAYS", defaults.first_visit_due_days)
                .and_then(check_first_visit_due_days)
                .context("FIRST_VISIT_DUE_DAYS must be a whole number of days")?,
        })
    }
}

fn check_first_visit_due_days(days: i64) -> Result<i64> {
    if !FIRST_VISIT_DUE_DAYS_RANGE.contains(&days) {
        bail!(
            "{days} is outside {}..={}",
            FIRST_VISIT_DUE_DAYS_RANGE.start(),
            FIRST_VISIT_DUE_DAYS_RANGE.end()
        );
    }
    Ok(days)
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for '{key}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_boot_without_api_key() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert!(config.anthropic_api_key.is_none());
        assert_eq!(config.first_visit_due_days, 7);
    }

    #[test]
    fn test_parse_env_falls_back_to_default() {
        let value: u64 = parse_env("SHEPHERD_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_first_visit_due_days_out_of_range_is_rejected() {
        assert_eq!(check_first_visit_due_days(0).unwrap(), 0);
        assert_eq!(check_first_visit_due_days(3650).unwrap(), 3650);
        assert!(check_first_visit_due_days(-1).is_err());
        assert!(check_first_visit_due_days(10_000_000_000).is_err());
    }
}
