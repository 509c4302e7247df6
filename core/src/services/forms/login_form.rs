//! Phone number entry screen

use rv_shared::phone;

use crate::domain::entities::session::Session;
use crate::errors::{AuthError, AuthResult};
use crate::services::otp_gateway::OtpGatewayTrait;
use crate::services::session::SessionStateMachine;

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    /// Digits typed so far, at most 10
    input: String,
    error: Option<AuthError>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the input as the user types; clears the field error
    pub fn set_input(&mut self, raw: &str) {
        self.input = phone::normalize(raw);
        self.error = None;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Input grouped for display, e.g. `98765 432 10`
    pub fn display_value(&self) -> String {
        phone::format(&self.input)
    }

    pub fn is_input_valid(&self) -> bool {
        phone::is_valid(&self.input)
    }

    pub fn error(&self) -> Option<&AuthError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(AuthError::user_message)
    }

    /// Request an OTP for the entered number
    pub async fn submit<G>(&mut self, machine: &SessionStateMachine<G>) -> AuthResult<Session>
    where
        G: OtpGatewayTrait + ?Sized,
    {
        self.error = None;

        let result = if self.input.is_empty() {
            Err(AuthError::RequiredField {
                field: "phone_number",
            })
        } else {
            machine.login(&self.input).await
        };

        if let Err(err) = &result {
            self.error = Some(err.clone());
        }
        result
    }
}
