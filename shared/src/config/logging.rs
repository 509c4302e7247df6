//! Log output configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::environment::Environment;

/// How the binary installs its tracing subscriber
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `rv_core=debug,info`
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// ANSI colours; only sensible on a terminal
    #[serde(default = "default_true")]
    pub colored: bool,

    /// Attach file and line to every event
    #[serde(default)]
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::Staging)
    }
}

impl LoggingConfig {
    /// Verbose pretty output in development, terse JSON elsewhere
    pub fn for_environment(env: Environment) -> Self {
        let development = env.is_development();
        let level = match env {
            Environment::Development => "debug",
            Environment::Staging => "info",
            Environment::Production => "warn",
        };
        Self {
            level: level.to_string(),
            format: if development {
                LogFormat::Pretty
            } else {
                LogFormat::Json
            },
            colored: development,
            source_location: development,
        }
    }

    /// Apply `RV_LOG_LEVEL` and `RV_LOG_FORMAT`; an unparsable format is ignored
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(level) = std::env::var("RV_LOG_LEVEL") {
            self.level = level;
        }
        if let Some(format) = std::env::var("RV_LOG_FORMAT")
            .ok()
            .and_then(|value| value.parse().ok())
        {
            self.format = format;
        }
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            other => Err(format!("Unknown log format '{}'", other)),
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_logs_warnings_as_json() {
        let config = LoggingConfig::for_environment(Environment::Production);
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.colored);
    }

    #[test]
    fn test_development_logs_are_verbose() {
        let config = LoggingConfig::for_environment(Environment::Development);
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.source_location);
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("COMPACT".parse::<LogFormat>(), Ok(LogFormat::Compact));
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
