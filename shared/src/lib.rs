//! Shared utilities and common types for RydrVault
//!
//! This crate provides functionality used across the workspace:
//! - Configuration types (environment, logging, session timing, OTP gateway)
//! - Input utilities (phone number and OTP digit masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, Environment, GatewayConfig, LogFormat, LoggingConfig, SessionConfig};
pub use utils::{otp, phone};
