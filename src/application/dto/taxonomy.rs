use crate::domain::taxonomy::{Term, TermKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TermDto {
    pub id: i64,
    #[schema(value_type = String)]
    pub kind: TermKind,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Term> for TermDto {
    fn from(term: Term) -> Self {
        Self {
            id: term.id.into(),
            kind: term.kind,
            name: term.name.into_inner(),
            slug: term.slug,
            created_at: term.created_at,
            updated_at: term.updated_at,
        }
    }
}
