//! Mock OTP Gateway Implementation
//!
//! Stands in for the OTP backend during development and testing. Codes are
//! logged instead of delivered, and both calls sleep for a configurable
//! delay to model the network round-trip.

use async_trait::async_trait;
use rand::Rng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{info, warn};

use rv_core::{GatewayError, OtpGatewayTrait, VerifiedIdentity};
use rv_shared::{otp, phone};

/// Mock OTP gateway for development and testing
///
/// This implementation:
/// - Generates a random 6-digit code per send and logs it
/// - Accepts any well-formed code, or only the issued one in strict mode
/// - Tracks the number of codes sent
/// - Can simulate an unreachable backend
#[derive(Clone)]
pub struct MockOtpGateway {
    /// Simulated latency of `send_otp`
    login_delay: Duration,
    /// Simulated latency of `verify`
    verify_delay: Duration,
    /// Counter for tracking number of codes sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures
    simulate_failure: Arc<AtomicBool>,
    /// Whether `verify` checks the code against the one issued
    strict_codes: bool,
    /// Last code issued per phone number
    issued_codes: Arc<Mutex<HashMap<String, String>>>,
    /// Whether to print issued codes to the console
    console_output: bool,
}

impl MockOtpGateway {
    /// Create a mock gateway that answers immediately
    pub fn new() -> Self {
        Self::with_delays(Duration::ZERO, Duration::ZERO)
    }

    /// Create a mock gateway with simulated network delays
    pub fn with_delays(login_delay: Duration, verify_delay: Duration) -> Self {
        Self {
            login_delay,
            verify_delay,
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: Arc::new(AtomicBool::new(false)),
            strict_codes: false,
            issued_codes: Arc::new(Mutex::new(HashMap::new())),
            console_output: false,
        }
    }

    /// Only accept the code most recently issued for a phone number
    pub fn with_strict_codes(mut self, strict: bool) -> Self {
        self.strict_codes = strict;
        self
    }

    /// Print issued codes to stdout so they can be typed in by hand
    pub fn with_console_output(mut self, console_output: bool) -> Self {
        self.console_output = console_output;
        self
    }

    /// Get the total number of codes sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Code most recently issued for a phone number
    pub fn issued_code(&self, phone: &str) -> Option<String> {
        self.codes().get(phone).cloned()
    }

    fn codes(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.issued_codes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn generate_code() -> String {
        format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
    }

    fn check_available(&self) -> Result<(), GatewayError> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!("Mock OTP gateway simulating failure");
            return Err(GatewayError::Unavailable(
                "Simulated OTP service failure".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MockOtpGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpGatewayTrait for MockOtpGateway {
    async fn send_otp(&self, phone_number: &str) -> Result<(), GatewayError> {
        tokio::time::sleep(self.login_delay).await;
        self.check_available()?;

        if !phone::is_valid(phone_number) {
            return Err(GatewayError::Unavailable(format!(
                "Invalid phone number format: {}",
                phone::mask(phone_number)
            )));
        }

        let code = Self::generate_code();
        self.codes().insert(phone_number.to_string(), code.clone());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            phone = %phone::mask(phone_number),
            message_count = count,
            event = "mock_otp_sent",
            "Mock OTP issued"
        );

        if self.console_output {
            println!(
                "[MOCK OTP] Code for {}: {}",
                phone::display_with_country_code(phone_number),
                code
            );
        }

        Ok(())
    }

    async fn verify(
        &self,
        phone_number: &str,
        code: &str,
    ) -> Result<VerifiedIdentity, GatewayError> {
        tokio::time::sleep(self.verify_delay).await;
        self.check_available()?;

        if !otp::is_valid(code) {
            return Err(GatewayError::Rejected);
        }

        if self.strict_codes {
            let mut codes = self.codes();
            let matches = codes.get(phone_number).is_some_and(|issued| issued == code);
            if !matches {
                warn!(
                    phone = %phone::mask(phone_number),
                    event = "mock_otp_rejected",
                    "Mock OTP did not match the issued code"
                );
                return Err(GatewayError::Rejected);
            }
            codes.remove(phone_number);
        }

        let identity = VerifiedIdentity::generate();
        info!(
            phone = %phone::mask(phone_number),
            user_id = %identity.user_id,
            event = "mock_otp_verified",
            "Mock OTP accepted"
        );
        Ok(identity)
    }
}
