//! Session state machine implementation

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio_util::sync::CancellationToken;

use rv_shared::{otp, phone};

use crate::domain::entities::session::{Operation, Phase, Session, SessionState};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, AuthResult, GatewayError};
use crate::services::otp_gateway::OtpGatewayTrait;

use super::config::SessionServiceConfig;

/// Drives login, OTP verification, resend, go-back and logout
///
/// At most one gateway call (login, verify or resend) is in flight at a time;
/// the in-flight slot doubles as the session's busy flag. State changes from
/// a gateway call become visible only once the call has resolved.
pub struct SessionStateMachine<G: OtpGatewayTrait + ?Sized> {
    /// Backend used to send and verify codes
    gateway: Arc<G>,
    /// Service configuration
    config: SessionServiceConfig,
    inner: RwLock<Inner>,
    next_ticket: AtomicU64,
}

#[derive(Default)]
struct Inner {
    state: SessionState,
    in_flight: Option<InFlight>,
}

impl Inner {
    fn owns(&self, ticket_id: u64) -> bool {
        self.in_flight.as_ref().is_some_and(|f| f.id == ticket_id)
    }

    fn cancel_in_flight(&mut self) -> Option<Operation> {
        self.in_flight.take().map(|in_flight| {
            in_flight.token.cancel();
            in_flight.operation
        })
    }
}

struct InFlight {
    id: u64,
    operation: Operation,
    token: CancellationToken,
}

/// Claim on the busy flag for one gateway call
///
/// Dropping an unreleased ticket frees the flag, so a failed call or a
/// caller that abandons the future never leaves the session stuck busy.
struct Ticket<'a> {
    inner: &'a RwLock<Inner>,
    id: u64,
    operation: Operation,
    token: CancellationToken,
    released: bool,
}

impl Drop for Ticket<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let mut inner = write(self.inner);
        if inner.owns(self.id) {
            inner.in_flight = None;
            tracing::debug!(
                operation = %self.operation,
                event = "busy_released",
                "Released busy flag without a transition"
            );
        }
    }
}

fn read(lock: &RwLock<Inner>) -> RwLockReadGuard<'_, Inner> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write(lock: &RwLock<Inner>) -> RwLockWriteGuard<'_, Inner> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl<G: OtpGatewayTrait + ?Sized> SessionStateMachine<G> {
    /// Create a state machine in the anonymous phase
    ///
    /// # Arguments
    ///
    /// * `gateway` - OTP backend implementation
    /// * `config` - Service configuration
    pub fn new(gateway: Arc<G>, config: SessionServiceConfig) -> Self {
        Self {
            gateway,
            config,
            inner: RwLock::new(Inner::default()),
            next_ticket: AtomicU64::new(1),
        }
    }

    /// Current session as seen by the UI
    pub fn snapshot(&self) -> Session {
        let inner = read(&self.inner);
        inner.state.snapshot(inner.in_flight.is_some())
    }

    pub fn phase(&self) -> Phase {
        read(&self.inner).state.phase()
    }

    pub fn is_busy(&self) -> bool {
        read(&self.inner).in_flight.is_some()
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase() == Phase::Authenticated
    }

    /// Submit a phone number and request an OTP for it
    ///
    /// Allowed while anonymous or awaiting an OTP; a second login replaces the
    /// pending number. The raw input is normalized first and must contain
    /// exactly 10 digits.
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - Session now awaiting the OTP for the new number
    /// * `Err(AuthError)` - Validation, busy, transition or gateway failure;
    ///   the session is unchanged
    pub async fn login(&self, raw_phone: &str) -> AuthResult<Session> {
        let (ticket, phone_number) = self
            .begin(Operation::Login, |_| {
                let digits = phone::normalize(raw_phone);
                if phone::is_valid(&digits) {
                    Ok(digits)
                } else {
                    Err(AuthError::InvalidPhone {
                        digits: digits.len(),
                    })
                }
            })
            .inspect_err(|e| log_rejected(Operation::Login, e))?;

        tracing::info!(
            phone = %phone::mask(&phone_number),
            event = "otp_requested",
            "Requesting OTP for phone number"
        );

        self.dispatch(&ticket, self.gateway.send_otp(&phone_number))
            .await
            .inspect_err(|e| log_failed(Operation::Login, e))?;

        let session = self.complete(ticket, move |state| {
            *state = SessionState::Pending {
                phone_number,
                otp_attempt: None,
            };
        })?;

        tracing::info!(
            phone = %phone::mask(&session.phone_number),
            event = "otp_sent",
            "Session awaiting OTP"
        );
        Ok(session)
    }

    /// Submit the OTP for the pending phone number
    ///
    /// The normalized code is recorded as `otp_attempt` at submission, so
    /// snapshots taken while the call is in flight already show it. It stays
    /// recorded when the gateway rejects the code, fails or times out, and is
    /// cleared only by leaving the pending phase or by a resend.
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - Authenticated session carrying the new user
    /// * `Err(AuthError)` - Validation, busy, transition or gateway failure;
    ///   the session stays in its current phase
    pub async fn verify_otp(&self, raw_otp: &str) -> AuthResult<Session> {
        let (ticket, (phone_number, code)) = self
            .begin(Operation::VerifyOtp, |state| {
                let code = otp::normalize(raw_otp);
                if !otp::is_valid(&code) {
                    return Err(AuthError::InvalidOtp { digits: code.len() });
                }
                match state {
                    SessionState::Pending {
                        phone_number,
                        otp_attempt,
                    } => {
                        *otp_attempt = Some(code.clone());
                        Ok((phone_number.clone(), code))
                    }
                    other => Err(AuthError::InvalidTransition {
                        operation: Operation::VerifyOtp,
                        phase: other.phase(),
                    }),
                }
            })
            .inspect_err(|e| log_rejected(Operation::VerifyOtp, e))?;

        let identity = self
            .dispatch(&ticket, self.gateway.verify(&phone_number, &code))
            .await
            .inspect_err(|e| log_failed(Operation::VerifyOtp, e))?;

        let session = self.complete(ticket, move |state| {
            *state = SessionState::Authenticated {
                user: User::new(phone_number, identity),
            };
        })?;

        tracing::info!(
            phone = %phone::mask(&session.phone_number),
            user_id = session.user.as_ref().map(|u| u.user_id.as_str()).unwrap_or_default(),
            event = "otp_verified",
            "Session authenticated"
        );
        Ok(session)
    }

    /// Ask the gateway to send a new code to the pending phone number
    ///
    /// The phase does not change; the last submitted OTP is discarded.
    pub async fn resend_otp(&self) -> AuthResult<Session> {
        let (ticket, phone_number) = self
            .begin(Operation::ResendOtp, |state| match state {
                SessionState::Pending { phone_number, .. } => Ok(phone_number.clone()),
                other => Err(AuthError::InvalidTransition {
                    operation: Operation::ResendOtp,
                    phase: other.phase(),
                }),
            })
            .inspect_err(|e| log_rejected(Operation::ResendOtp, e))?;

        self.dispatch(&ticket, self.gateway.send_otp(&phone_number))
            .await
            .inspect_err(|e| log_failed(Operation::ResendOtp, e))?;

        let session = self.complete(ticket, |state| {
            if let SessionState::Pending { otp_attempt, .. } = state {
                *otp_attempt = None;
            }
        })?;

        tracing::info!(
            phone = %phone::mask(&session.phone_number),
            event = "otp_resent",
            "Resent OTP"
        );
        Ok(session)
    }

    /// Leave the OTP screen and return to the anonymous phase
    ///
    /// Only valid while awaiting an OTP. Any call in flight is cancelled.
    pub fn go_back(&self) -> AuthResult<Session> {
        let mut inner = write(&self.inner);
        if !inner.state.permits(Operation::GoBack) {
            return Err(AuthError::InvalidTransition {
                operation: Operation::GoBack,
                phase: inner.state.phase(),
            });
        }

        if let Some(cancelled) = inner.cancel_in_flight() {
            tracing::info!(
                operation = %cancelled,
                event = "operation_cancelled",
                "Cancelled on go back"
            );
        }
        inner.state = SessionState::Anonymous;
        Ok(inner.state.snapshot(false))
    }

    /// Reset to the anonymous phase from any state
    ///
    /// Never fails. Any call in flight is cancelled and its result discarded.
    pub fn logout(&self) -> Session {
        let mut inner = write(&self.inner);
        if let Some(cancelled) = inner.cancel_in_flight() {
            tracing::info!(
                operation = %cancelled,
                event = "operation_cancelled",
                "Cancelled on logout"
            );
        }
        if inner.state.phase() != Phase::Anonymous {
            tracing::info!(event = "logout", "Session reset");
        }
        inner.state = SessionState::Anonymous;
        inner.state.snapshot(false)
    }

    /// Check the guards for `operation` and claim the busy flag
    ///
    /// `prepare` runs under the same lock, after the guards and before the
    /// flag is set. An error from it leaves the session untouched.
    fn begin<T>(
        &self,
        operation: Operation,
        prepare: impl FnOnce(&mut SessionState) -> AuthResult<T>,
    ) -> AuthResult<(Ticket<'_>, T)> {
        let mut inner = write(&self.inner);
        if inner.in_flight.is_some() {
            return Err(AuthError::OperationInProgress);
        }
        if !inner.state.permits(operation) {
            return Err(AuthError::InvalidTransition {
                operation,
                phase: inner.state.phase(),
            });
        }

        let prepared = prepare(&mut inner.state)?;

        let id = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();
        inner.in_flight = Some(InFlight {
            id,
            operation,
            token: token.clone(),
        });

        let ticket = Ticket {
            inner: &self.inner,
            id,
            operation,
            token,
            released: false,
        };
        Ok((ticket, prepared))
    }

    /// Await a gateway call under the request timeout and the ticket's token
    async fn dispatch<T>(
        &self,
        ticket: &Ticket<'_>,
        call: impl Future<Output = Result<T, GatewayError>>,
    ) -> AuthResult<T> {
        let timeout = self.config.request_timeout;
        tokio::select! {
            biased;
            _ = ticket.token.cancelled() => Err(AuthError::Cancelled),
            outcome = tokio::time::timeout(timeout, call) => match outcome {
                Ok(result) => result.map_err(AuthError::from),
                Err(_) => Err(AuthError::timeout(timeout)),
            },
        }
    }

    /// Apply the transition for a resolved call and clear the busy flag
    ///
    /// Fails with `Cancelled` when logout or go-back took the session away
    /// while the call was in flight.
    fn complete(
        &self,
        mut ticket: Ticket<'_>,
        apply: impl FnOnce(&mut SessionState),
    ) -> AuthResult<Session> {
        let mut inner = write(&self.inner);
        ticket.released = true;
        if !inner.owns(ticket.id) {
            return Err(AuthError::Cancelled);
        }

        inner.in_flight = None;
        apply(&mut inner.state);
        Ok(inner.state.snapshot(false))
    }
}

fn log_rejected(operation: Operation, err: &AuthError) {
    tracing::debug!(
        operation = %operation,
        error_code = err.error_code(),
        event = "operation_rejected",
        "{}", err
    );
}

fn log_failed(operation: Operation, err: &AuthError) {
    tracing::warn!(
        operation = %operation,
        error_code = err.error_code(),
        event = "operation_failed",
        "{}", err
    );
}
