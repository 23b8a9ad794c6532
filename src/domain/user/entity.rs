// src/domain/user/entity.rs
use std::collections::HashSet;

use crate::domain::user::value_objects::{Capability, PasswordHash, Role, UserId, Username};
use chrono::{DateTime, Utc};

/// Club member who can sign in. Deactivated accounts keep their articles.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Grants carried in freshly issued tokens.
    pub fn capabilities(&self) -> HashSet<Capability> {
        self.role.default_capabilities()
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Accounts start active.
    pub fn active(
        username: Username,
        password_hash: PasswordHash,
        role: Role,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            password_hash,
            role,
            is_active: true,
            created_at,
        }
    }
}
