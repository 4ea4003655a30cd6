use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

pub const ADMIN_ROLE: &str = "admin";

/// A profile row. `id` is the auth identity that owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub role: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Self-service profile update. Only `full_name` is accepted; any other field
/// in the submitted body (including `role`) is discarded during decoding.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileUpdateForm {
    #[validate(length(min = 2, message = "Full name must be at least 2 characters."))]
    pub full_name: String,
}
