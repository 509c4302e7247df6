//! OTP Gateway Module
//!
//! Implementations of [`rv_core::OtpGatewayTrait`]. The mock gateway logs
//! codes instead of delivering them and is used for development and tests.

pub mod mock_gateway;

pub use mock_gateway::MockOtpGateway;

#[cfg(test)]
mod tests;
