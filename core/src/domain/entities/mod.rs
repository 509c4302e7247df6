//! Domain entities representing the signed-in rider and their session.

pub mod session;
pub mod user;

#[cfg(test)]
mod tests;

pub use session::{Operation, Phase, Session, SessionState};
pub use user::{User, DEFAULT_DISPLAY_NAME};
