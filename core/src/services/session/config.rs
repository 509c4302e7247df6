//! Configuration for the session state machine

use std::time::Duration;

use rv_shared::config::SessionConfig;

#[derive(Debug, Clone)]
pub struct SessionServiceConfig {
    /// Upper bound on a single gateway call
    pub request_timeout: Duration,
}

impl Default for SessionServiceConfig {
    fn default() -> Self {
        Self::from(&SessionConfig::default())
    }
}

impl From<&SessionConfig> for SessionServiceConfig {
    fn from(config: &SessionConfig) -> Self {
        Self {
            request_timeout: config.request_timeout(),
        }
    }
}
