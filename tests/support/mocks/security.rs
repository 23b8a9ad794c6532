// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::Duration;
use robotika_cms::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::security::{PasswordHasher, TokenManager},
};
use robotika_cms::domain::user::{Role, UserId};

pub const ADMIN_TOKEN: &str = "admin-token";
pub const AUTHOR_TOKEN: &str = "author-token";
pub const OTHER_AUTHOR_TOKEN: &str = "other-author-token";

pub const ADMIN_ID: i64 = 1;
pub const AUTHOR_ID: i64 = 2;
pub const OTHER_AUTHOR_ID: i64 = 3;

pub fn test_user(id: i64, username: &str, role: Role) -> AuthenticatedUser {
    let now = super::time::fixed_now();
    AuthenticatedUser {
        id: UserId(id),
        username: username.into(),
        role,
        capabilities: role.default_capabilities(),
        issued_at: now,
        expires_at: now + Duration::hours(1),
    }
}

pub fn admin() -> AuthenticatedUser {
    test_user(ADMIN_ID, "admin", Role::Admin)
}

pub fn author() -> AuthenticatedUser {
    test_user(AUTHOR_ID, "ada", Role::Author)
}

pub fn other_author() -> AuthenticatedUser {
    test_user(OTHER_AUTHOR_ID, "linus", Role::Author)
}

/// Resolves the fixed test tokens; issued tokens are `token-for-<username>`.
#[derive(Clone, Debug, Default)]
pub struct DummyTokenManager;

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let now = super::time::fixed_now();
        Ok(AuthTokenDto {
            token: format!("token-for-{}", subject.username),
            issued_at: now,
            expires_at: now + Duration::hours(1),
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        match token {
            ADMIN_TOKEN => Ok(admin()),
            AUTHOR_TOKEN => Ok(author()),
            OTHER_AUTHOR_TOKEN => Ok(other_author()),
            _ => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}

/// Deterministic hasher: the hash of `pw` is `hash::pw`.
#[derive(Clone, Debug, Default)]
pub struct StrictPasswordHasher;

#[async_trait]
impl PasswordHasher for StrictPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("hash::{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if format!("hash::{password}") == expected_hash {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}
