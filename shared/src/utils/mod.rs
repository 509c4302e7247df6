//! Input normalization and display utilities

pub mod otp;
pub mod phone;
