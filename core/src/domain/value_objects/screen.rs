//! Screen routing
//!
//! The UI shows exactly one of three screens, chosen from the session phase
//! alone. Home is never reachable without an authenticated session.

use serde::{Deserialize, Serialize};

use crate::domain::entities::session::{Phase, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Login,
    Otp,
    Home,
}

impl Screen {
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Anonymous => Screen::Login,
            Phase::AwaitingOtp => Screen::Otp,
            Phase::Authenticated => Screen::Home,
        }
    }

    pub fn for_session(session: &Session) -> Self {
        Self::for_phase(session.phase)
    }

    /// Deep-link path segment
    pub fn path(&self) -> &'static str {
        match self {
            Screen::Login => "login",
            Screen::Otp => "otp",
            Screen::Home => "home",
        }
    }

    /// Parse a deep-link path segment
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_matches('/') {
            "login" => Some(Screen::Login),
            "otp" => Some(Screen::Otp),
            "home" => Some(Screen::Home),
            _ => None,
        }
    }

    /// Resolve a deep link against the current session
    ///
    /// A link is honoured only when it names the screen the session is already
    /// on; anything else, including unknown paths, lands on that screen.
    pub fn resolve_link(path: &str, session: &Session) -> Self {
        let current = Self::for_session(session);
        match Self::from_path(path) {
            Some(requested) if requested == current => requested,
            Some(requested) => {
                tracing::debug!(
                    requested = requested.path(),
                    current = current.path(),
                    "Deep link redirected to current screen"
                );
                current
            }
            None => current,
        }
    }
}
