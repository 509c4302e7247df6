//! OTP entry screen
//!
//! A fresh form, and with it a fresh resend countdown, is created every time
//! the OTP screen becomes active.

use rv_shared::{otp, phone};

use crate::domain::entities::session::Session;
use crate::errors::{AuthError, AuthResult};
use crate::services::otp_gateway::OtpGatewayTrait;
use crate::services::resend::ResendTimer;
use crate::services::session::SessionStateMachine;

#[derive(Debug, Clone)]
pub struct OtpForm {
    /// Number the code was sent to
    phone_number: String,
    /// Digits typed so far, at most 6
    input: String,
    error: Option<AuthError>,
    timer: ResendTimer,
}

impl OtpForm {
    pub fn new(phone_number: impl Into<String>, resend_countdown_secs: u32) -> Self {
        Self {
            phone_number: phone_number.into(),
            input: String::new(),
            error: None,
            timer: ResendTimer::new(resend_countdown_secs),
        }
    }

    /// Form for the number the session is awaiting a code for
    pub fn for_session(session: &Session, resend_countdown_secs: u32) -> Self {
        Self::new(session.phone_number.clone(), resend_countdown_secs)
    }

    /// Where the code went, e.g. `+91 98765 432 10`
    pub fn destination(&self) -> String {
        phone::display_with_country_code(&self.phone_number)
    }

    /// Replace the input as the user types; clears the field error
    pub fn set_input(&mut self, raw: &str) {
        self.input = otp::normalize(raw);
        self.error = None;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_input_valid(&self) -> bool {
        otp::is_valid(&self.input)
    }

    pub fn error(&self) -> Option<&AuthError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(AuthError::user_message)
    }

    /// Advance the resend countdown by one second
    pub fn tick(&mut self) {
        self.timer.tick();
    }

    pub fn timer(&self) -> &ResendTimer {
        &self.timer
    }

    pub fn resend_label(&self) -> Option<String> {
        self.timer.label()
    }

    /// Verify the entered code
    pub async fn submit<G>(&mut self, machine: &SessionStateMachine<G>) -> AuthResult<Session>
    where
        G: OtpGatewayTrait + ?Sized,
    {
        self.error = None;

        let result = if self.input.is_empty() {
            Err(AuthError::RequiredField { field: "otp" })
        } else {
            machine.verify_otp(&self.input).await
        };

        if let Err(err) = &result {
            self.error = Some(err.clone());
        }
        result
    }

    /// Send a new code once the countdown has run out
    ///
    /// While counting this returns `NotReady` and changes nothing. On success
    /// the input and field error are cleared and the countdown restarts.
    pub async fn resend<G>(&mut self, machine: &SessionStateMachine<G>) -> AuthResult<Session>
    where
        G: OtpGatewayTrait + ?Sized,
    {
        if !self.timer.can_resend() {
            return Err(AuthError::NotReady {
                remaining_seconds: self.timer.remaining_seconds(),
            });
        }

        let session = match machine.resend_otp().await {
            Ok(session) => session,
            Err(err) => {
                self.error = Some(err.clone());
                return Err(err);
            }
        };

        self.timer.resend()?;
        self.input.clear();
        self.error = None;
        Ok(session)
    }
}
