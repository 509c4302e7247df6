//! Form presenters for the login and OTP screens
//!
//! Each presenter holds what its screen shows between renders: the
//! normalized input, the current field error and, for the OTP screen, the
//! resend countdown. Submissions go through the session state machine.

mod login_form;
mod otp_form;


pub use login_form::LoginForm;
pub use otp_form::OtpForm;
