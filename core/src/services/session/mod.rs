//! Session state machine
//!
//! Owns the authentication lifecycle (anonymous, awaiting OTP,
//! authenticated) and is the single source of truth for whether the rider
//! is signed in.

mod config;
mod service;


pub use config::SessionServiceConfig;
pub use service::SessionStateMachine;
