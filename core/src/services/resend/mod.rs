//! Resend countdown for the OTP screen

mod timer;


pub use timer::{ResendSnapshot, ResendState, ResendTimer, DEFAULT_RESEND_SECONDS};
