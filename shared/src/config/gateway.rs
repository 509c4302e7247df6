//! OTP gateway configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Selects and tunes the OTP gateway implementation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// Gateway provider ("mock" or "instant")
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Make every gateway call fail with a network error
    #[serde(default)]
    pub simulate_failure: bool,

    /// Only accept the code that was actually sent, instead of any 6 digits
    #[serde(default)]
    pub strict_codes: bool,

    /// Print issued codes to the console so a local user can log in
    #[serde(default)]
    pub echo_codes: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            simulate_failure: false,
            strict_codes: false,
            echo_codes: false,
        }
    }
}

impl GatewayConfig {
    /// Load from `RV_OTP_*` environment variables
    pub fn from_env() -> Self {
        Self {
            provider: env::var("RV_OTP_PROVIDER").unwrap_or_else(|_| default_provider()),
            simulate_failure: env_flag("RV_OTP_SIMULATE_FAILURE"),
            strict_codes: env_flag("RV_OTP_STRICT_CODES"),
            echo_codes: env_flag("RV_OTP_ECHO_CODES"),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key)
        .map(|value| matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn default_provider() -> String {
    String::from("mock")
}
