//! Boundary to the OTP backend
//!
//! The state machine never talks to the network directly. Implementations
//! live in the infrastructure crate; tests substitute an in-process fake.

use async_trait::async_trait;

use crate::domain::value_objects::VerifiedIdentity;
use crate::errors::GatewayError;

/// Trait for OTP dispatch and verification services
#[async_trait]
pub trait OtpGatewayTrait: Send + Sync {
    /// Deliver a fresh code to a normalized 10-digit phone number
    async fn send_otp(&self, phone: &str) -> Result<(), GatewayError>;

    /// Check a 6-digit code for a phone number and return who it belongs to
    async fn verify(&self, phone: &str, otp: &str) -> Result<VerifiedIdentity, GatewayError>;
}
