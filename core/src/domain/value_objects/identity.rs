//! Identity returned by the verification service after an OTP is accepted

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::DEFAULT_DISPLAY_NAME;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    pub user_id: String,
    pub display_name: String,
}

impl VerifiedIdentity {
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
        }
    }

    /// Fresh opaque identifier with the placeholder display name
    pub fn generate() -> Self {
        Self::new(Uuid::new_v4().simple().to_string(), DEFAULT_DISPLAY_NAME)
    }
}
