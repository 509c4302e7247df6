//! Services containing the login flow logic.

pub mod forms;
pub mod otp_gateway;
pub mod resend;
pub mod session;

// Re-export commonly used types
pub use forms::{LoginForm, OtpForm};
pub use otp_gateway::OtpGatewayTrait;
pub use resend::{ResendSnapshot, ResendState, ResendTimer, DEFAULT_RESEND_SECONDS};
pub use session::{SessionServiceConfig, SessionStateMachine};
