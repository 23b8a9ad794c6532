use std::collections::BTreeSet;

use crate::domain::user::{Capability, Role, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::auth::AuthenticatedUser;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    #[schema(value_type = String)]
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            username: user.username.to_string(),
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// A `resource:action` grant, listed in the profile so clients can hide
/// controls the caller cannot use.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub struct CapabilityView {
    pub resource: String,
    pub action: String,
}

impl From<&Capability> for CapabilityView {
    fn from(value: &Capability) -> Self {
        Self {
            resource: value.resource.clone(),
            action: value.action.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfileDto {
    pub user: UserDto,
    /// Sorted by resource, then action.
    pub capabilities: Vec<CapabilityView>,
    pub expires_at: DateTime<Utc>,
    /// Seconds left on the presented token, never negative.
    pub expires_in: i64,
}

impl UserProfileDto {
    pub fn from_parts(user: User, auth: &AuthenticatedUser, now: DateTime<Utc>) -> Self {
        let capabilities: BTreeSet<CapabilityView> =
            auth.capabilities.iter().map(CapabilityView::from).collect();

        Self {
            user: user.into(),
            capabilities: capabilities.into_iter().collect(),
            expires_at: auth.expires_at,
            expires_in: (auth.expires_at - now).num_seconds().max(0),
        }
    }
}
