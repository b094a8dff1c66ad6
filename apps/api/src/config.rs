use std::str::FromStr;

use anyhow::{Context, Result};

use crate::generation::assembler::{MAX_PROBLEMS_PER_PAGE, PROBLEMS_PER_PAGE};

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Page capacity used when a request does not ask for one.
    pub problems_per_page: usize,
    /// Upper bound for `page_count` on a single request.
    pub max_page_count: u32,
    /// `false` installs the disabled export backend.
    pub export_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            problems_per_page: PROBLEMS_PER_PAGE,
            max_page_count: 10,
            export_enabled: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let config = Config {
            port: env_or("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            problems_per_page: env_or("PROBLEMS_PER_PAGE", defaults.problems_per_page)?,
            max_page_count: env_or("MAX_PAGE_COUNT", defaults.max_page_count)?,
            export_enabled: env_or("EXPORT_ENABLED", defaults.export_enabled)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would make every request fail.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            (1..=MAX_PROBLEMS_PER_PAGE).contains(&self.problems_per_page),
            "PROBLEMS_PER_PAGE must be between 1 and {MAX_PROBLEMS_PER_PAGE}, got {}",
            self.problems_per_page
        );
        anyhow::ensure!(self.max_page_count > 0, "MAX_PAGE_COUNT must be at least 1");
        Ok(())
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_behavior() {
        let config = Config::default();
        assert_eq!(config.problems_per_page, 12);
        assert_eq!(config.max_page_count, 10);
        assert!(config.export_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_page_capacity_above_ceiling_fails_validation() {
        let config = Config {
            problems_per_page: MAX_PROBLEMS_PER_PAGE + 1,
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("PROBLEMS_PER_PAGE"));

        let at_ceiling = Config {
            problems_per_page: MAX_PROBLEMS_PER_PAGE,
            ..Config::default()
        };
        assert!(at_ceiling.validate().is_ok());
    }

    #[test]
    fn test_zero_limits_fail_validation() {
        let no_capacity = Config {
            problems_per_page: 0,
            ..Config::default()
        };
        assert!(no_capacity.validate().is_err());

        let no_pages = Config {
            max_page_count: 0,
            ..Config::default()
        };
        assert!(no_pages.validate().is_err());
    }

    #[test]
    fn test_env_or_parses_and_reports_bad_values() {
        std::env::set_var("WORKSHEET_TEST_PAGE_COUNT", "7");
        assert_eq!(env_or("WORKSHEET_TEST_PAGE_COUNT", 1u32).unwrap(), 7);

        std::env::set_var("WORKSHEET_TEST_BAD_FLAG", "maybe");
        let err = env_or("WORKSHEET_TEST_BAD_FLAG", true).unwrap_err();
        assert!(err.to_string().contains("WORKSHEET_TEST_BAD_FLAG"));

        assert_eq!(env_or("WORKSHEET_TEST_UNSET_VAR", 3usize).unwrap(), 3);
    }
}
