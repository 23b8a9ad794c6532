// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("could not generate a unique address for '{base}' after {attempts} attempts")]
    SlugExhausted { base: String, attempts: u32 },
    #[error("slug conflict: {0}")]
    SlugConflict(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn is_slug_conflict(&self) -> bool {
        matches!(self, Self::SlugConflict(_))
    }
}
