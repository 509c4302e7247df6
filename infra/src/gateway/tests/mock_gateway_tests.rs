//! Unit tests for mock OTP gateway

use std::time::Duration;

use rv_core::{GatewayError, OtpGatewayTrait};

use crate::gateway::MockOtpGateway;

#[tokio::test]
async fn test_send_issues_six_digit_code() {
    let gateway = MockOtpGateway::new();

    gateway.send_otp("9876543210").await.unwrap();

    let code = gateway.issued_code("9876543210").unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(gateway.get_message_count(), 1);
}

#[tokio::test]
async fn test_send_rejects_unnormalized_phone() {
    let gateway = MockOtpGateway::new();

    let result = gateway.send_otp("98765").await;

    match result {
        Err(GatewayError::Unavailable(message)) => {
            assert!(message.contains("Invalid phone number"))
        }
        other => panic!("Expected Unavailable error, got {:?}", other),
    }
    assert_eq!(gateway.get_message_count(), 0);
}

#[tokio::test]
async fn test_lenient_verify_accepts_any_code() {
    let gateway = MockOtpGateway::new();
    gateway.send_otp("9876543210").await.unwrap();

    let identity = gateway.verify("9876543210", "654321").await.unwrap();

    assert_eq!(identity.display_name, "Rider");
    assert!(!identity.user_id.is_empty());
}

#[tokio::test]
async fn test_strict_verify_requires_issued_code() {
    let gateway = MockOtpGateway::new().with_strict_codes(true);
    gateway.send_otp("9876543210").await.unwrap();
    let issued = gateway.issued_code("9876543210").unwrap();
    let wrong = if issued == "000000" { "111111" } else { "000000" };

    assert_eq!(
        gateway.verify("9876543210", wrong).await,
        Err(GatewayError::Rejected)
    );
    assert!(gateway.verify("9876543210", &issued).await.is_ok());

    // codes are single use
    assert_eq!(
        gateway.verify("9876543210", &issued).await,
        Err(GatewayError::Rejected)
    );
}

#[tokio::test]
async fn test_resend_replaces_issued_code() {
    let gateway = MockOtpGateway::new().with_strict_codes(true);
    gateway.send_otp("9876543210").await.unwrap();
    gateway.send_otp("9876543210").await.unwrap();

    let latest = gateway.issued_code("9876543210").unwrap();
    assert!(gateway.verify("9876543210", &latest).await.is_ok());
    assert_eq!(gateway.get_message_count(), 2);
}

#[tokio::test]
async fn test_simulate_failure() {
    let gateway = MockOtpGateway::new();
    gateway.set_simulate_failure(true);

    assert!(matches!(
        gateway.send_otp("9876543210").await,
        Err(GatewayError::Unavailable(_))
    ));
    assert!(matches!(
        gateway.verify("9876543210", "654321").await,
        Err(GatewayError::Unavailable(_))
    ));

    gateway.set_simulate_failure(false);
    assert!(gateway.send_otp("9876543210").await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_delays_are_applied() {
    let gateway =
        MockOtpGateway::with_delays(Duration::from_millis(1000), Duration::from_millis(1500));
    let start = tokio::time::Instant::now();

    gateway.send_otp("9876543210").await.unwrap();
    let after_send = start.elapsed();
    assert!(after_send >= Duration::from_millis(1000));
    assert!(after_send < Duration::from_millis(1100));

    gateway.verify("9876543210", "654321").await.unwrap();
    let after_verify = start.elapsed();
    assert!(after_verify >= Duration::from_millis(2500));
    assert!(after_verify < Duration::from_millis(2600));
}
