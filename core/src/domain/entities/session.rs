//! Session entity and the authentication phase transition table.
//!
//! ```text
//!   Anonymous ──login──> Pending ──verify──> Authenticated
//!       ^                 │  ^                    │
//!       │                 └──┘ login (overwrite)  │
//!       └──── goBack / logout ─┴──── logout ──────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use super::user::User;

/// Coarse authentication phase exposed to the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Anonymous,
    AwaitingOtp,
    Authenticated,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Anonymous => write!(f, "anonymous"),
            Phase::AwaitingOtp => write!(f, "awaiting OTP"),
            Phase::Authenticated => write!(f, "authenticated"),
        }
    }
}

/// Trigger events accepted by the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Login,
    VerifyOtp,
    ResendOtp,
    GoBack,
    Logout,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Login => write!(f, "log in"),
            Operation::VerifyOtp => write!(f, "verify OTP"),
            Operation::ResendOtp => write!(f, "resend OTP"),
            Operation::GoBack => write!(f, "go back"),
            Operation::Logout => write!(f, "log out"),
        }
    }
}

/// Authoritative session state
///
/// Phone number and user live inside the variants so that a pending session
/// always has a phone number and only an authenticated one has a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Pending {
        phone_number: String,
        otp_attempt: Option<String>,
    },
    Authenticated {
        user: User,
    },
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        match self {
            SessionState::Anonymous => Phase::Anonymous,
            SessionState::Pending { .. } => Phase::AwaitingOtp,
            SessionState::Authenticated { .. } => Phase::Authenticated,
        }
    }

    /// Whether `operation` may start from this state
    pub fn permits(&self, operation: Operation) -> bool {
        match operation {
            Operation::Login => {
                matches!(self, SessionState::Anonymous | SessionState::Pending { .. })
            }
            Operation::VerifyOtp | Operation::ResendOtp | Operation::GoBack => {
                matches!(self, SessionState::Pending { .. })
            }
            Operation::Logout => true,
        }
    }

    pub fn phone_number(&self) -> Option<&str> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Pending { phone_number, .. } => Some(phone_number),
            SessionState::Authenticated { user } => Some(&user.phone_number),
        }
    }

    /// Read-only view for the UI
    pub fn snapshot(&self, is_busy: bool) -> Session {
        let (otp_attempt, user) = match self {
            SessionState::Anonymous => (String::new(), None),
            SessionState::Pending { otp_attempt, .. } => {
                (otp_attempt.clone().unwrap_or_default(), None)
            }
            SessionState::Authenticated { user } => (String::new(), Some(user.clone())),
        };

        Session {
            phase: self.phase(),
            phone_number: self.phone_number().unwrap_or_default().to_string(),
            otp_attempt,
            user,
            is_busy,
        }
    }
}

/// Snapshot of the session handed to the UI after every change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub phase: Phase,
    /// Empty while anonymous
    pub phone_number: String,
    /// Last submitted OTP, only while awaiting verification
    pub otp_attempt: String,
    pub user: Option<User>,
    pub is_busy: bool,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.phase == Phase::Authenticated
    }
}

impl Default for Session {
    fn default() -> Self {
        SessionState::Anonymous.snapshot(false)
    }
}
