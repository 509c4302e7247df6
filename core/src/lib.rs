//! # RydrVault Core
//!
//! Core logic for the RydrVault storefront shell: the session state machine
//! that drives phone login and OTP verification, the resend countdown, the
//! login and OTP form presenters, and the screen router.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    Operation, Phase, Screen, Session, SessionState, User, VerifiedIdentity, DEFAULT_DISPLAY_NAME,
};
pub use errors::{AuthError, AuthResult, GatewayError};
pub use services::{
    LoginForm, OtpForm, OtpGatewayTrait, ResendSnapshot, ResendState, ResendTimer,
    SessionServiceConfig, SessionStateMachine, DEFAULT_RESEND_SECONDS,
};
