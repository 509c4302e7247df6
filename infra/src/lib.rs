//! # Infrastructure Layer
//!
//! Concrete implementations of the OTP gateway the session state machine
//! talks to. Only simulated backends exist so far: the delays stand in for
//! the network round-trip of a real OTP dispatch and verification service.

use std::sync::Arc;

use rv_core::OtpGatewayTrait;
use rv_shared::config::{GatewayConfig, SessionConfig};

/// OTP gateway module - simulated OTP backends
pub mod gateway;

pub use gateway::MockOtpGateway;

/// Build the OTP gateway selected by configuration
///
/// # Arguments
///
/// * `gateway` - Provider selection and failure simulation
/// * `session` - Simulated network delays
///
/// # Returns
///
/// * `Ok(Arc<dyn OtpGatewayTrait>)` - Gateway ready to hand to the state machine
/// * `Err(InfrastructureError::Config)` - Unknown provider name
pub fn create_otp_gateway(
    gateway: &GatewayConfig,
    session: &SessionConfig,
) -> Result<Arc<dyn OtpGatewayTrait>, InfrastructureError> {
    let mock = match gateway.provider.as_str() {
        "mock" => MockOtpGateway::with_delays(session.login_delay(), session.verify_delay()),
        "instant" => MockOtpGateway::new(),
        other => {
            return Err(InfrastructureError::Config(format!(
                "Unknown OTP provider '{}'",
                other
            )))
        }
    };

    let mock = mock
        .with_strict_codes(gateway.strict_codes)
        .with_console_output(gateway.echo_codes);
    mock.set_simulate_failure(gateway.simulate_failure);

    tracing::info!(
        provider = %gateway.provider,
        login_delay_ms = session.login_delay_ms,
        verify_delay_ms = session.verify_delay_ms,
        strict_codes = gateway.strict_codes,
        "Initialized OTP gateway"
    );

    Ok(Arc::new(mock))
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
