// src/domain/user/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl UserId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("user id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// `resource:action` grant such as `articles:update:own`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capability {
    pub resource: String,
    pub action: String,
}

impl Capability {
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }

    pub fn matches(&self, resource: &str, action: &str) -> bool {
        self.resource == resource && self.action == action
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Author,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Author => "author",
        }
    }

    /// Admins act on any article and manage taxonomies and accounts; authors
    /// only touch their own articles.
    pub fn default_capabilities(&self) -> HashSet<Capability> {
        use Capability as Cap;
        match self {
            Role::Admin => HashSet::from([
                Cap::new("articles", "create"),
                Cap::new("articles", "update:any"),
                Cap::new("articles", "delete:any"),
                Cap::new("articles", "restore:any"),
                Cap::new("articles", "publish"),
                Cap::new("articles", "view:drafts"),
                Cap::new("categories", "manage"),
                Cap::new("tags", "manage"),
                Cap::new("uploads", "create"),
                Cap::new("users", "create"),
                Cap::new("users", "read"),
            ]),
            Role::Author => HashSet::from([
                Cap::new("articles", "create"),
                Cap::new("articles", "update:own"),
                Cap::new("articles", "delete:own"),
                Cap::new("articles", "restore:own"),
                Cap::new("articles", "publish"),
                Cap::new("uploads", "create"),
            ]),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "author" => Ok(Role::Author),
            other => Err(DomainError::Validation(format!("unknown role '{other}'"))),
        }
    }
}

const USERNAME_LEN: std::ops::RangeInclusive<usize> = 3..=32;

/// Login handle: 3 to 32 ASCII letters, digits, `.`, `_` or `-`, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_string();
        if !USERNAME_LEN.contains(&value.len()) {
            return Err(DomainError::Validation(format!(
                "username must be {} to {} characters long",
                USERNAME_LEN.start(),
                USERNAME_LEN.end()
            )));
        }
        if let Some(bad) = value
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        {
            return Err(DomainError::Validation(format!(
                "username cannot contain '{bad}'"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation(
                "password hash cannot be empty".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_cannot_touch_other_articles_or_taxonomy() {
        let caps = Role::Author.default_capabilities();
        assert!(caps.contains(&Capability::new("articles", "update:own")));
        assert!(!caps.contains(&Capability::new("articles", "update:any")));
        assert!(!caps.contains(&Capability::new("categories", "manage")));
    }

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::Admin, Role::Author] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("editor".parse::<Role>().is_err());
    }

    #[test]
    fn usernames_are_trimmed_and_restricted() {
        assert!(Username::new("ab").is_err());
        assert!(Username::new("a".repeat(33)).is_err());
        assert!(Username::new("robo club").is_err());
        assert_eq!(Username::new("  ada.l ").unwrap().as_str(), "ada.l");
    }
}
