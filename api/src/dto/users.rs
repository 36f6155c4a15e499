use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;
use validator::Validate;

use ks_core::domain::entities::MAX_DISPLAY_NAME_LENGTH;
use ks_core::{Aggregate, User};

// validator's `length` bounds are u64
const DISPLAY_NAME_MAX: u64 = MAX_DISPLAY_NAME_LENGTH as u64;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = DISPLAY_NAME_MAX))]
    pub display_name: String,
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = DISPLAY_NAME_MAX))]
    pub display_name: Option<String>,

    /// Role to add; only admins pass the row policy for this
    #[validate(length(min = 1, max = 64))]
    pub grant_role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub roles: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            email: user.email().to_string(),
            display_name: user.display_name().to_string(),
            roles: user.roles().clone(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}
