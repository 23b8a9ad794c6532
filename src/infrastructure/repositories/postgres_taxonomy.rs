// src/infrastructure/repositories/postgres_taxonomy.rs
use super::{like_pattern, map_sqlx};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::listing::Page;
use crate::domain::taxonomy::{
    NewTerm, TaxonomyRepository, Term, TermId, TermKind, TermListQuery, TermName, TermSortField,
    TermUpdate,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

/// Categories and tags live in sibling tables of identical shape; the table
/// name comes from [`TermKind::plural`], never from input.
#[derive(Clone)]
pub struct PostgresTaxonomyRepository {
    pool: PgPool,
}

impl PostgresTaxonomyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TermRow {
    id: i64,
    name: String,
    slug: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TermRow {
    fn into_term(self, kind: TermKind) -> DomainResult<Term> {
        Ok(Term {
            id: TermId::new(self.id)?,
            kind,
            name: TermName::new(self.name)?,
            slug: self.slug,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn push_search(builder: &mut QueryBuilder<'_, Postgres>, search: Option<&str>) {
    if let Some(search) = search {
        builder.push(" WHERE name ILIKE ");
        builder.push_bind(like_pattern(search));
    }
}

fn not_found(kind: TermKind) -> DomainError {
    DomainError::NotFound(format!("{kind} not found"))
}

#[async_trait]
impl TaxonomyRepository for PostgresTaxonomyRepository {
    async fn insert(&self, term: NewTerm) -> DomainResult<Term> {
        let table = term.kind.plural();
        let row = sqlx::query_as::<_, TermRow>(&format!(
            "INSERT INTO {table} (name, slug, created_at, updated_at)
             VALUES ($1, $2, $3, $3)
             RETURNING id, name, slug, created_at, updated_at"
        ))
        .bind(term.name.as_str())
        .bind(&term.slug)
        .bind(term.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.into_term(term.kind)
    }

    async fn update(&self, update: TermUpdate) -> DomainResult<Term> {
        let table = update.kind.plural();
        let row = sqlx::query_as::<_, TermRow>(&format!(
            "UPDATE {table} SET name = $2, slug = $3, updated_at = $4
             WHERE id = $1
             RETURNING id, name, slug, created_at, updated_at"
        ))
        .bind(i64::from(update.id))
        .bind(update.name.as_str())
        .bind(&update.slug)
        .bind(update.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| not_found(update.kind))?;

        row.into_term(update.kind)
    }

    async fn delete(&self, kind: TermKind, id: TermId) -> DomainResult<()> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", kind.plural()))
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(not_found(kind));
        }
        Ok(())
    }

    async fn find_by_id(&self, kind: TermKind, id: TermId) -> DomainResult<Option<Term>> {
        let row = sqlx::query_as::<_, TermRow>(&format!(
            "SELECT id, name, slug, created_at, updated_at FROM {} WHERE id = $1",
            kind.plural()
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(|row| row.into_term(kind)).transpose()
    }

    async fn slug_taken(
        &self,
        kind: TermKind,
        slug: &str,
        exclude: Option<TermId>,
    ) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>(&format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
            kind.plural()
        ))
        .bind(slug)
        .bind(exclude.map(i64::from))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn list(&self, query: TermListQuery) -> DomainResult<Page<Term>> {
        let table = query.kind.plural();

        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT COUNT(*) FROM {table}"));
        push_search(&mut count, query.search.as_deref());
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut select: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT id, name, slug, created_at, updated_at FROM {table}"
        ));
        push_search(&mut select, query.search.as_deref());
        let column = match query.order_by {
            TermSortField::Name => "name",
            TermSortField::CreatedAt => "created_at",
        };
        let direction = query.direction.as_sql();
        select.push(format!(" ORDER BY {column} {direction}, id {direction}"));
        select.push(" LIMIT ");
        select.push_bind(query.page.limit());
        select.push(" OFFSET ");
        select.push_bind(query.page.offset());

        let rows = select
            .build_query_as::<TermRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let items = rows
            .into_iter()
            .map(|row| row.into_term(query.kind))
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Page::new(
            items,
            u64::try_from(total).unwrap_or_default(),
            query.page,
        ))
    }
}
