//! User entity representing an authenticated rider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rv_shared::phone;

use crate::domain::value_objects::VerifiedIdentity;

/// Display name given to riders until they set their own
pub const DEFAULT_DISPLAY_NAME: &str = "Rider";

/// Identity record present only while the session is authenticated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Normalized 10-digit phone number the rider logged in with
    pub phone_number: String,

    /// Opaque identifier issued by the verification service
    pub user_id: String,

    /// Name shown in the home screen greeting
    pub display_name: String,

    /// When the OTP was accepted
    pub authenticated_at: DateTime<Utc>,
}

impl User {
    /// Creates a user for the phone number that was just verified
    pub fn new(phone_number: String, identity: VerifiedIdentity) -> Self {
        Self {
            phone_number,
            user_id: identity.user_id,
            display_name: identity.display_name,
            authenticated_at: Utc::now(),
        }
    }

    /// Phone number with country code, e.g. `+91 98765 432 10`
    pub fn display_phone(&self) -> String {
        phone::display_with_country_code(&self.phone_number)
    }
}
