//! Unit tests for session state and snapshots

use crate::domain::entities::session::{Operation, Phase, Session, SessionState};
use crate::domain::entities::user::User;
use crate::domain::value_objects::VerifiedIdentity;

fn pending() -> SessionState {
    SessionState::Pending {
        phone_number: "9876543210".to_string(),
        otp_attempt: Some("654321".to_string()),
    }
}

fn authenticated() -> SessionState {
    SessionState::Authenticated {
        user: User::new("9876543210".to_string(), VerifiedIdentity::generate()),
    }
}

#[test]
fn test_transition_table() {
    let anonymous = SessionState::Anonymous;
    assert!(anonymous.permits(Operation::Login));
    assert!(!anonymous.permits(Operation::VerifyOtp));
    assert!(!anonymous.permits(Operation::ResendOtp));
    assert!(!anonymous.permits(Operation::GoBack));
    assert!(anonymous.permits(Operation::Logout));

    let pending = pending();
    assert!(pending.permits(Operation::Login));
    assert!(pending.permits(Operation::VerifyOtp));
    assert!(pending.permits(Operation::ResendOtp));
    assert!(pending.permits(Operation::GoBack));

    let authenticated = authenticated();
    assert!(!authenticated.permits(Operation::Login));
    assert!(!authenticated.permits(Operation::VerifyOtp));
    assert!(!authenticated.permits(Operation::GoBack));
    assert!(authenticated.permits(Operation::Logout));
}

#[test]
fn test_anonymous_snapshot_is_empty() {
    let session = SessionState::Anonymous.snapshot(false);
    assert_eq!(session, Session::default());
    assert_eq!(session.phase, Phase::Anonymous);
    assert!(session.phone_number.is_empty());
    assert!(session.user.is_none());
    assert!(!session.is_authenticated());
}

#[test]
fn test_pending_snapshot_carries_phone_and_attempt() {
    let session = pending().snapshot(true);
    assert_eq!(session.phase, Phase::AwaitingOtp);
    assert_eq!(session.phone_number, "9876543210");
    assert_eq!(session.otp_attempt, "654321");
    assert!(session.user.is_none());
    assert!(session.is_busy);
}

#[test]
fn test_authenticated_snapshot_has_user_only() {
    let session = authenticated().snapshot(false);
    assert!(session.is_authenticated());
    assert_eq!(session.phone_number, "9876543210");
    assert!(session.otp_attempt.is_empty());
    assert_eq!(
        session.user.as_ref().map(|u| u.phone_number.as_str()),
        Some("9876543210")
    );
}

#[test]
fn test_snapshot_serializes_phase_in_snake_case() {
    let value = serde_json::to_value(pending().snapshot(false)).unwrap();
    assert_eq!(value["phase"], "awaiting_otp");
    assert_eq!(value["phone_number"], "9876543210");
    assert_eq!(value["user"], serde_json::Value::Null);
}
