//! Session timing configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Timing knobs for the login flow
///
/// The delays model the network round-trip of the mocked OTP backend and are
/// only honoured by the mock gateway. Tests set them to zero.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Simulated latency of the send-OTP call in milliseconds
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,

    /// Simulated latency of the verify-OTP call in milliseconds
    #[serde(default = "default_verify_delay_ms")]
    pub verify_delay_ms: u64,

    /// Seconds before the user may ask for a new code
    #[serde(default = "default_resend_countdown_secs")]
    pub resend_countdown_secs: u32,

    /// Upper bound on any single gateway call in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_delay_ms: default_login_delay_ms(),
            verify_delay_ms: default_verify_delay_ms(),
            resend_countdown_secs: default_resend_countdown_secs(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl SessionConfig {
    /// Load from `RV_*` environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            login_delay_ms: env_or("RV_LOGIN_DELAY_MS", defaults.login_delay_ms),
            verify_delay_ms: env_or("RV_VERIFY_DELAY_MS", defaults.verify_delay_ms),
            resend_countdown_secs: env_or(
                "RV_RESEND_COUNTDOWN_SECS",
                defaults.resend_countdown_secs,
            ),
            request_timeout_ms: env_or("RV_REQUEST_TIMEOUT_MS", defaults.request_timeout_ms),
        }
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }

    pub fn verify_delay(&self) -> Duration {
        Duration::from_millis(self.verify_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn default_login_delay_ms() -> u64 {
    1000
}

fn default_verify_delay_ms() -> u64 {
    1500
}

fn default_resend_countdown_secs() -> u32 {
    30
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.login_delay(), Duration::from_secs(1));
        assert_eq!(config.verify_delay(), Duration::from_millis(1500));
        assert_eq!(config.resend_countdown_secs, 30);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }
}
