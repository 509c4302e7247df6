//! Unit tests for user entity

use crate::domain::entities::user::{User, DEFAULT_DISPLAY_NAME};
use crate::domain::value_objects::VerifiedIdentity;

#[test]
fn test_new_user_takes_identity() {
    let user = User::new(
        "9876543210".to_string(),
        VerifiedIdentity::new("abc123", "Asha"),
    );

    assert_eq!(user.phone_number, "9876543210");
    assert_eq!(user.user_id, "abc123");
    assert_eq!(user.display_name, "Asha");
}

#[test]
fn test_generated_identity_is_fresh() {
    let first = VerifiedIdentity::generate();
    let second = VerifiedIdentity::generate();

    assert_eq!(first.display_name, DEFAULT_DISPLAY_NAME);
    assert!(!first.user_id.is_empty());
    assert_ne!(first.user_id, second.user_id);
}

#[test]
fn test_display_phone() {
    let user = User::new("9876543210".to_string(), VerifiedIdentity::generate());
    assert_eq!(user.display_phone(), "+91 98765 432 10");
}
