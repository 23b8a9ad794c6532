// src/domain/taxonomy/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    Category,
    Tag,
}

impl TermKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TermKind::Category => "category",
            TermKind::Tag => "tag",
        }
    }

    /// Plural form, used for table names and capability resources.
    pub fn plural(&self) -> &'static str {
        match self {
            TermKind::Category => "categories",
            TermKind::Tag => "tags",
        }
    }
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TermKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "category" | "categories" => Ok(TermKind::Category),
            "tag" | "tags" => Ok(TermKind::Tag),
            other => Err(DomainError::Validation(format!("unknown taxonomy '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermId(pub i64);

impl TermId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("term id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<TermId> for i64 {
    fn from(value: TermId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermName(String);

impl TermName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("name cannot be empty".into()));
        }
        if trimmed.chars().count() > 100 {
            return Err(DomainError::Validation(
                "name must be at most 100 characters".into(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Term {
    pub id: TermId,
    pub kind: TermKind,
    pub name: TermName,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTerm {
    pub kind: TermKind,
    pub name: TermName,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TermUpdate {
    pub id: TermId,
    pub kind: TermKind,
    pub name: TermName,
    pub slug: String,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_singular_and_plural() {
        assert_eq!("tags".parse::<TermKind>().unwrap(), TermKind::Tag);
        assert_eq!("category".parse::<TermKind>().unwrap(), TermKind::Category);
        assert!("divisions".parse::<TermKind>().is_err());
    }

    #[test]
    fn name_is_trimmed_and_bounded() {
        assert_eq!(TermName::new(" Robotics ").unwrap().as_str(), "Robotics");
        assert!(TermName::new("").is_err());
        assert!(TermName::new("x".repeat(101)).is_err());
    }
}
