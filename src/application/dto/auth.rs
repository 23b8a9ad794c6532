use crate::domain::user::{Capability, Role, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthTokenDto {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    pub capabilities: HashSet<Capability>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthenticatedUser {
    pub fn has_capability(&self, resource: &str, action: &str) -> bool {
        self.capabilities
            .iter()
            .any(|cap| cap.matches(resource, action))
    }
}

/// Who is performing a command. Requests act as an authenticated user;
/// internal callers act as the configured system identity, which holds every
/// capability.
#[derive(Debug, Clone)]
pub enum Actor {
    User(AuthenticatedUser),
    System,
}

impl Actor {
    pub fn user(&self) -> Option<&AuthenticatedUser> {
        match self {
            Actor::User(user) => Some(user),
            Actor::System => None,
        }
    }

    pub fn has_capability(&self, resource: &str, action: &str) -> bool {
        match self {
            Actor::User(user) => user.has_capability(resource, action),
            Actor::System => true,
        }
    }

    /// Identity recorded as author; the system identity when no user acts.
    pub fn author_id(&self, system_user: UserId) -> UserId {
        match self {
            Actor::User(user) => user.id,
            Actor::System => system_user,
        }
    }
}

impl From<AuthenticatedUser> for Actor {
    fn from(user: AuthenticatedUser) -> Self {
        Actor::User(user)
    }
}

#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    pub capabilities: HashSet<Capability>,
}
