//! Runtime configuration for the RydrVault shell
//!
//! Every section has serde defaults and a `from_env()` loader reading `RV_*`
//! variables. Callers load `.env` files before calling [`AppConfig::from_env`].

pub mod environment;
pub mod gateway;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

pub use environment::Environment;
pub use gateway::GatewayConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use session::SessionConfig;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    /// Mocked network delays, resend countdown and request timeout
    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Built-in defaults for `environment`, ignoring the process environment
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            session: SessionConfig::default(),
            gateway: GatewayConfig {
                echo_codes: environment.is_development(),
                ..GatewayConfig::default()
            },
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Read every section from environment variables
    ///
    /// Issued codes are echoed to the console in development even when
    /// `RV_OTP_ECHO_CODES` is unset.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let mut gateway = GatewayConfig::from_env();
        gateway.echo_codes |= environment.is_development();

        Self {
            environment,
            session: SessionConfig::from_env(),
            gateway,
            logging: LoggingConfig::for_environment(environment).with_env_overrides(),
        }
    }
}
