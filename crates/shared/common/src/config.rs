//! Runtime configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use chrono::NaiveDate;
use domain::{AppException, ConfigurationCode, DomainResult};
use tracing::Level;

pub const DEFAULT_SERVICE_NAME: &str = "apprentice-tracker";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Service name for logging
    pub service_name: String,
    pub log: LogConfig,
    /// Fixed "today" for date rules. `None` uses the local clock.
    pub validation_today: Option<NaiveDate>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            log: LogConfig::default(),
            validation_today: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment, after reading `.env`
    /// if one exists.
    pub fn from_env() -> DomainResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`.
    ///
    /// Malformed values are rejected with `CONF_002`.
    pub fn from_vars<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service_name = lookup("SERVICE_NAME")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());

        let level_raw = lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let level = parse_level(&level_raw).map_err(|e| {
            AppException::configuration(
                ConfigurationCode::Invalid,
                format!("LOG_LEVEL has an unsupported value '{}'", level_raw),
            )
            .with_source(e)
        })?;

        let validation_today = match lookup("VALIDATION_TODAY") {
            Some(raw) if !raw.trim().is_empty() => Some(
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
                    AppException::configuration(
                        ConfigurationCode::Invalid,
                        format!("VALIDATION_TODAY must be YYYY-MM-DD, got '{}'", raw),
                    )
                    .with_source(e)
                })?,
            ),
            _ => None,
        };

        Ok(Self {
            service_name,
            log: LogConfig { level },
            validation_today,
        })
    }
}

/// `warning` is accepted as an alias for `warn`.
fn parse_level(raw: &str) -> Result<Level, <Level as FromStr>::Err> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("warning") {
        return Ok(Level::WARN);
    }
    raw.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> DomainResult<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(load(&[]).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_reads_values() {
        let config = load(&[
            ("SERVICE_NAME", "tracker-test"),
            ("LOG_LEVEL", "debug"),
            ("VALIDATION_TODAY", "2024-03-04"),
        ])
        .unwrap();
        assert_eq!(config.service_name, "tracker-test");
        assert_eq!(config.log.level, Level::DEBUG);
        assert_eq!(config.validation_today, NaiveDate::from_ymd_opt(2024, 3, 4));

        for warning in ["warning", "WARNING", " Warning "] {
            let config = load(&[("LOG_LEVEL", warning)]).unwrap();
            assert_eq!(config.log.level, Level::WARN);
        }
        assert_eq!(load(&[("LOG_LEVEL", "ERROR")]).unwrap().log.level, Level::ERROR);
    }

    #[test]
    fn test_rejects_bad_level() {
        let err = load(&[("LOG_LEVEL", "loud")]).unwrap_err();
        assert_eq!(err.code(), "CONF_002");
        assert!(err.original_error().is_some());
    }

    #[test]
    fn test_rejects_bad_date() {
        let err = load(&[("VALIDATION_TODAY", "04/03/2024")]).unwrap_err();
        assert_eq!(err.code(), "CONF_002");
    }
}
