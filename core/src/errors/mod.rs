//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, GatewayError};

pub type AuthResult<T> = Result<T, AuthError>;
