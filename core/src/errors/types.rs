//! Error types for the login flow
//!
//! Every failure is reported as a typed result. None of them are fatal: the
//! UI turns them into field errors, disabled affordances or retry prompts.

use std::time::Duration;

use thiserror::Error;

use crate::domain::entities::session::{Operation, Phase};

/// Errors surfaced by the session state machine and form presenters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Field required: {field}")]
    RequiredField { field: &'static str },

    #[error("Invalid phone number: expected 10 digits, got {digits}")]
    InvalidPhone { digits: usize },

    #[error("Invalid OTP: expected 6 digits, got {digits}")]
    InvalidOtp { digits: usize },

    #[error("OTP was rejected by the verification service")]
    OtpRejected,

    #[error("Resend available in {remaining_seconds}s")]
    NotReady { remaining_seconds: u32 },

    #[error("Another operation is already in progress")]
    OperationInProgress,

    #[error("Cannot {operation} while {phase}")]
    InvalidTransition { operation: Operation, phase: Phase },

    #[error("Network failure: {message}")]
    NetworkFailure { message: String },

    #[error("Request timed out after {millis}ms")]
    Timeout { millis: u64 },

    #[error("Operation cancelled")]
    Cancelled,
}

impl AuthError {
    /// Timeout after `limit`, saturating at `u64::MAX` milliseconds
    pub fn timeout(limit: Duration) -> Self {
        AuthError::Timeout {
            millis: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::RequiredField { .. } => "REQUIRED_FIELD",
            AuthError::InvalidPhone { .. } => "INVALID_PHONE",
            AuthError::InvalidOtp { .. } => "INVALID_OTP",
            AuthError::OtpRejected => "OTP_REJECTED",
            AuthError::NotReady { .. } => "NOT_READY",
            AuthError::OperationInProgress => "OPERATION_IN_PROGRESS",
            AuthError::InvalidTransition { .. } => "INVALID_TRANSITION",
            AuthError::NetworkFailure { .. } => "NETWORK_FAILURE",
            AuthError::Timeout { .. } => "TIMEOUT",
            AuthError::Cancelled => "CANCELLED",
        }
    }

    /// Text shown next to the form field or on the retry prompt
    pub fn user_message(&self) -> String {
        match self {
            AuthError::RequiredField { field } if *field == "otp" => {
                "Please enter the OTP".to_string()
            }
            AuthError::RequiredField { .. } => "Please enter your mobile number".to_string(),
            AuthError::InvalidPhone { .. } => {
                "Please enter a valid 10-digit mobile number".to_string()
            }
            AuthError::InvalidOtp { .. } => "Please enter a valid 6-digit OTP".to_string(),
            AuthError::OtpRejected => "OTP verification failed. Please try again.".to_string(),
            AuthError::NotReady { remaining_seconds } => {
                format!("Resend in {}s", remaining_seconds)
            }
            AuthError::OperationInProgress => "Please wait...".to_string(),
            AuthError::InvalidTransition { .. } | AuthError::Cancelled => {
                "Something went wrong. Please start again.".to_string()
            }
            AuthError::NetworkFailure { .. } | AuthError::Timeout { .. } => {
                "Could not reach the server. Please try again.".to_string()
            }
        }
    }

    /// Whether retrying the same request may succeed without resetting the session
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AuthError::NetworkFailure { .. }
                | AuthError::Timeout { .. }
                | AuthError::OperationInProgress
        )
    }
}

/// Errors returned by an OTP gateway implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("OTP service unavailable: {0}")]
    Unavailable(String),

    #[error("OTP code rejected")]
    Rejected,
}

impl From<GatewayError> for AuthError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Unavailable(message) => AuthError::NetworkFailure { message },
            GatewayError::Rejected => AuthError::OtpRejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct_per_kind() {
        assert_eq!(AuthError::InvalidPhone { digits: 3 }.error_code(), "INVALID_PHONE");
        assert_eq!(AuthError::InvalidOtp { digits: 2 }.error_code(), "INVALID_OTP");
        assert_eq!(AuthError::OperationInProgress.error_code(), "OPERATION_IN_PROGRESS");
        assert_eq!(AuthError::Timeout { millis: 10 }.error_code(), "TIMEOUT");
    }

    #[test]
    fn test_timeout_millis_saturate() {
        assert_eq!(
            AuthError::timeout(Duration::from_millis(2_500)),
            AuthError::Timeout { millis: 2_500 }
        );
        assert_eq!(
            AuthError::timeout(Duration::MAX),
            AuthError::Timeout { millis: u64::MAX }
        );
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AuthError::RequiredField { field: "phone_number" }.user_message(),
            "Please enter your mobile number"
        );
        assert_eq!(
            AuthError::RequiredField { field: "otp" }.user_message(),
            "Please enter the OTP"
        );
        assert_eq!(
            AuthError::InvalidOtp { digits: 4 }.user_message(),
            "Please enter a valid 6-digit OTP"
        );
        assert_eq!(
            AuthError::NotReady { remaining_seconds: 12 }.user_message(),
            "Resend in 12s"
        );
    }

    #[test]
    fn test_gateway_error_mapping() {
        let err: AuthError = GatewayError::Unavailable("connection reset".into()).into();
        assert_eq!(
            err,
            AuthError::NetworkFailure { message: "connection reset".into() }
        );
        assert!(err.is_retryable());

        let err: AuthError = GatewayError::Rejected.into();
        assert_eq!(err, AuthError::OtpRejected);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_invalid_transition_display() {
        let err = AuthError::InvalidTransition {
            operation: Operation::VerifyOtp,
            phase: Phase::Authenticated,
        };
        assert_eq!(err.to_string(), "Cannot verify OTP while authenticated");
    }
}
