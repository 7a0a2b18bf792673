//! File-based logger configuration
//!
//! ```json
//! {
//!   "level": 16,
//!   "details": 33,
//!   "time_format": "%H:%M:%S",
//!   "console": true,
//!   "syslog": false,
//!   "level_env": "LOG_LEVEL"
//! }
//! ```
//!
//! Every key is optional; missing keys take the defaults of a fresh logger.

use super::{
    details::DetailsFilter,
    error::{LoggerError, Result},
    log_level::LevelFilter,
    timestamp::{format_datetime, DEFAULT_TIME_FORMAT},
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Severity filter bits
    pub level: LevelFilter,
    /// Detail filter bits
    pub details: DetailsFilter,
    /// strftime format for the console timestamp
    pub time_format: String,
    /// Register the stdout console destination
    pub console: bool,
    /// Register the syslog destination
    pub syslog: bool,
    /// Facility name such as `"daemon"` or `"local2"`
    pub syslog_facility: Option<String>,
    pub syslog_ident: Option<String>,
    /// Environment variable overriding `level` when set
    pub level_env: Option<String>,
    /// Environment variable overriding `details` when set
    pub details_env: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::default(),
            details: DetailsFilter::default(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            console: false,
            syslog: false,
            syslog_facility: None,
            syslog_ident: None,
            level_env: None,
            details_env: None,
        }
    }
}

impl LoggerConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::JsonError`] for malformed JSON, unknown keys or
    /// out-of-range filters, and [`LoggerError::TimeFormatError`] for a bad
    /// time format.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, in addition to the
    /// [`LoggerConfig::from_json_str`] errors.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the fields serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Fails on an empty or invalid time format, an empty environment
    /// variable name or a NUL byte in the syslog ident.
    pub fn validate(&self) -> Result<()> {
        if self.time_format.is_empty() {
            return Err(LoggerError::config("time_format", "must not be empty"));
        }
        format_datetime(&chrono::Utc::now(), &self.time_format)?;

        for (field, var) in [("level_env", &self.level_env), ("details_env", &self.details_env)] {
            if var.as_deref().is_some_and(|name| name.is_empty() || name.contains('=')) {
                return Err(LoggerError::config(field, "invalid environment variable name"));
            }
        }

        if self.syslog_ident.as_deref().is_some_and(|ident| ident.contains('\0')) {
            return Err(LoggerError::config("syslog_ident", "contains a NUL byte"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_fresh_logger() {
        let config = LoggerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, LoggerConfig::default());
        assert_eq!(config.level, LevelFilter::TRACE);
        assert_eq!(config.details, DetailsFilter::WITHOUT_APP_NAME);
        assert_eq!(config.time_format, DEFAULT_TIME_FORMAT);
    }

    #[test]
    fn test_parse_full() {
        let config = LoggerConfig::from_json_str(
            r#"{
                "level": 16,
                "details": 33,
                "time_format": "%H:%M:%S",
                "console": true,
                "syslog": true,
                "syslog_facility": "daemon",
                "level_env": "APP_LOG_LEVEL"
            }"#,
        )
        .unwrap();

        assert_eq!(config.level, LevelFilter::DEBUG);
        assert_eq!(config.details, DetailsFilter::MESSAGE_WITHOUT_SOURCE_CODE);
        assert!(config.console);
        assert!(config.syslog);
        assert_eq!(config.syslog_facility.as_deref(), Some("daemon"));
        assert_eq!(config.level_env.as_deref(), Some("APP_LOG_LEVEL"));
        assert_eq!(config.details_env, None);
    }

    #[test]
    fn test_out_of_range_filter_rejected() {
        let result = LoggerConfig::from_json_str(r#"{"level": 32}"#);
        assert!(matches!(result, Err(LoggerError::JsonError(_))));

        let result = LoggerConfig::from_json_str(r#"{"details": -1}"#);
        assert!(matches!(result, Err(LoggerError::JsonError(_))));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = LoggerConfig::from_json_str(r#"{"rotation": "daily"}"#);
        assert!(matches!(result, Err(LoggerError::JsonError(_))));
    }

    #[test]
    fn test_invalid_time_format() {
        let result = LoggerConfig::from_json_str(r#"{"time_format": "%Q"}"#);
        assert!(matches!(result, Err(LoggerError::TimeFormatError { .. })));

        let result = LoggerConfig::from_json_str(r#"{"time_format": ""}"#);
        assert!(matches!(result, Err(LoggerError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_invalid_env_name() {
        let result = LoggerConfig::from_json_str(r#"{"details_env": ""}"#);
        assert!(matches!(result, Err(LoggerError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"level": 28, "console": true}}"#).unwrap();

        let config = LoggerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.level, LevelFilter::WARNING);
        assert!(config.console);
    }

    #[test]
    fn test_missing_file() {
        let result = LoggerConfig::from_file("/nonexistent/logger.json");
        assert!(matches!(result, Err(LoggerError::IoError(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let config = LoggerConfig {
            level: LevelFilter::INFO,
            console: true,
            ..LoggerConfig::default()
        };
        let json = config.to_json_string().unwrap();
        assert!(json.contains("\"level\": 24"));
        assert_eq!(LoggerConfig::from_json_str(&json).unwrap(), config);
    }
}
