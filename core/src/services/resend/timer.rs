//! Countdown gating the resend-OTP affordance
//!
//! The timer owns no clock. Whoever presents the OTP screen calls [`ResendTimer::tick`]
//! once per second, which keeps the transition logic testable without real
//! time. The countdown is a UX affordance only and says nothing about
//! whether a code has expired.

use serde::{Deserialize, Serialize};

use crate::errors::{AuthError, AuthResult};

/// Seconds the rider waits before a new code may be requested
pub const DEFAULT_RESEND_SECONDS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResendState {
    /// Seconds left, never zero
    Counting(u32),
    Ready,
}

/// Read-only view for the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResendSnapshot {
    pub remaining_seconds: u32,
    pub can_resend: bool,
}

#[derive(Debug, Clone)]
pub struct ResendTimer {
    state: ResendState,
    initial_seconds: u32,
}

impl Default for ResendTimer {
    fn default() -> Self {
        Self::new(DEFAULT_RESEND_SECONDS)
    }
}

impl ResendTimer {
    /// Start counting down from `initial_seconds`
    pub fn new(initial_seconds: u32) -> Self {
        Self {
            state: Self::counting(initial_seconds),
            initial_seconds,
        }
    }

    fn counting(seconds: u32) -> ResendState {
        if seconds == 0 {
            ResendState::Ready
        } else {
            ResendState::Counting(seconds)
        }
    }

    pub fn state(&self) -> ResendState {
        self.state
    }

    /// Advance by one second; `Counting(1)` becomes `Ready`
    pub fn tick(&mut self) {
        if let ResendState::Counting(remaining) = self.state {
            self.state = Self::counting(remaining - 1);
        }
    }

    /// Restart the countdown from the configured initial value
    pub fn reset(&mut self) {
        self.state = Self::counting(self.initial_seconds);
    }

    /// Restart the countdown from an explicit value
    pub fn reset_to(&mut self, initial_seconds: u32) {
        self.initial_seconds = initial_seconds;
        self.reset();
    }

    pub fn can_resend(&self) -> bool {
        self.state == ResendState::Ready
    }

    pub fn remaining_seconds(&self) -> u32 {
        match self.state {
            ResendState::Counting(remaining) => remaining,
            ResendState::Ready => 0,
        }
    }

    /// Consume the ready state and start a new countdown
    ///
    /// Fails with `NotReady` and changes nothing while still counting.
    pub fn resend(&mut self) -> AuthResult<()> {
        match self.state {
            ResendState::Ready => {
                self.reset();
                Ok(())
            }
            ResendState::Counting(remaining_seconds) => {
                Err(AuthError::NotReady { remaining_seconds })
            }
        }
    }

    pub fn snapshot(&self) -> ResendSnapshot {
        ResendSnapshot {
            remaining_seconds: self.remaining_seconds(),
            can_resend: self.can_resend(),
        }
    }

    /// Countdown caption, `None` once resend is available
    pub fn label(&self) -> Option<String> {
        match self.state {
            ResendState::Counting(remaining) => Some(format!("Resend in {}s", remaining)),
            ResendState::Ready => None,
        }
    }
}
