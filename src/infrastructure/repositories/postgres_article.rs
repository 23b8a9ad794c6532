// src/infrastructure/repositories/postgres_article.rs
use super::{like_pattern, map_sqlx};
use crate::domain::article::{
    Article, ArticleBody, ArticleExcerpt, ArticleId, ArticleListQuery, ArticleReadRepository,
    ArticleSlug, ArticleSortField, ArticleTitle, ArticleUpdate, ArticleWriteRepository,
    NewArticle, StatusFilter,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::listing::Page;
use crate::domain::taxonomy::TermId;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};

const ARTICLE_COLUMNS: &str = "a.id, a.title, a.slug, a.excerpt, a.body, a.cover_image_path, \
     a.category_id, a.author_id, a.published, a.published_at, a.view_count, \
     a.created_at, a.updated_at, a.deleted_at, \
     COALESCE((SELECT array_agg(t.tag_id ORDER BY t.tag_id) FROM article_tags t \
     WHERE t.article_id = a.id), '{}'::BIGINT[]) AS tag_ids";

#[derive(Clone)]
pub struct PostgresArticleWriteRepository {
    pool: PgPool,
}

impl PostgresArticleWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresArticleReadRepository {
    pool: PgPool,
}

impl PostgresArticleReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    slug: String,
    excerpt: Option<String>,
    body: String,
    cover_image_path: Option<String>,
    category_id: Option<i64>,
    tag_ids: Vec<i64>,
    author_id: i64,
    published: bool,
    published_at: Option<DateTime<Utc>>,
    view_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId::new(row.id)?,
            title: ArticleTitle::new(row.title)?,
            slug: ArticleSlug::new(row.slug)?,
            excerpt: ArticleExcerpt::parse(row.excerpt),
            body: ArticleBody::new(row.body)?,
            cover_image_path: row.cover_image_path,
            category_id: row.category_id.map(TermId::new).transpose()?,
            tag_ids: row
                .tag_ids
                .into_iter()
                .map(TermId::new)
                .collect::<Result<_, _>>()?,
            author_id: UserId::new(row.author_id)?,
            published: row.published,
            published_at: row.published_at,
            view_count: u64::try_from(row.view_count)
                .map_err(|_| DomainError::Persistence("negative view count".into()))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

async fn fetch_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    id: i64,
) -> DomainResult<Article> {
    let row = sqlx::query_as::<_, ArticleRow>(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles a WHERE a.id = $1"
    ))
    .bind(id)
    .fetch_one(&mut **tx)
    .await
    .map_err(map_sqlx)?;
    Article::try_from(row)
}

async fn replace_tags(
    tx: &mut Transaction<'_, Postgres>,
    article_id: i64,
    tag_ids: &[TermId],
) -> DomainResult<()> {
    sqlx::query("DELETE FROM article_tags WHERE article_id = $1")
        .bind(article_id)
        .execute(&mut **tx)
        .await
        .map_err(map_sqlx)?;

    if tag_ids.is_empty() {
        return Ok(());
    }

    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO article_tags (article_id, tag_id) ");
    builder.push_values(tag_ids, |mut row, tag_id| {
        row.push_bind(article_id).push_bind(i64::from(*tag_id));
    });
    builder
        .build()
        .execute(&mut **tx)
        .await
        .map_err(map_sqlx)?;
    Ok(())
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleWriteRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            title,
            slug,
            excerpt,
            body,
            cover_image_path,
            category_id,
            tag_ids,
            author_id,
            published,
            published_at,
            created_at,
            updated_at,
        } = article;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO articles (title, slug, excerpt, body, cover_image_path, category_id,
                 author_id, published, published_at, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING id",
        )
        .bind(title.as_str())
        .bind(slug.as_str())
        .bind(excerpt.as_ref().map(ArticleExcerpt::as_str))
        .bind(body.as_str())
        .bind(cover_image_path)
        .bind(category_id.map(i64::from))
        .bind(i64::from(author_id))
        .bind(published)
        .bind(published_at)
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        replace_tags(&mut tx, id, &tag_ids).await?;
        let article = fetch_in_tx(&mut tx, id).await?;
        tx.commit().await.map_err(map_sqlx)?;

        Ok(article)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let ArticleUpdate {
            id,
            title,
            slug,
            excerpt,
            body,
            cover_image_path,
            category_id,
            tag_ids,
            publish_state,
            original_updated_at,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE articles SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(title.into_inner());
        }
        if let Some(slug) = slug {
            builder.push(", slug = ");
            builder.push_bind(slug.into_inner());
        }
        if let Some(excerpt) = excerpt {
            builder.push(", excerpt = ");
            builder.push_bind(excerpt.map(ArticleExcerpt::into_inner));
        }
        if let Some(body) = body {
            builder.push(", body = ");
            builder.push_bind(body.into_inner());
        }
        if let Some(path) = cover_image_path {
            builder.push(", cover_image_path = ");
            builder.push_bind(path);
        }
        if let Some(category_id) = category_id {
            builder.push(", category_id = ");
            builder.push_bind(category_id.map(i64::from));
        }
        if let Some(state) = publish_state {
            builder.push(", published = ");
            builder.push_bind(state.published);
            builder.push(", published_at = ");
            builder.push_bind(state.published_at);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" AND updated_at = ");
        builder.push_bind(original_updated_at);
        builder.push(" AND deleted_at IS NULL RETURNING id");

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let updated = builder
            .build_query_scalar::<i64>()
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let Some(article_id) = updated else {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM articles WHERE id = $1 AND deleted_at IS NULL)",
            )
            .bind(i64::from(id))
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx)?;
            return Err(if exists {
                DomainError::Conflict("article update conflict, please retry".into())
            } else {
                DomainError::NotFound("article not found".into())
            });
        };

        if let Some(tag_ids) = tag_ids {
            replace_tags(&mut tx, article_id, &tag_ids).await?;
        }
        let article = fetch_in_tx(&mut tx, article_id).await?;
        tx.commit().await.map_err(map_sqlx)?;

        Ok(article)
    }

    async fn soft_delete(&self, id: ArticleId, at: DateTime<Utc>) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE articles SET deleted_at = $2, updated_at = $2
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(i64::from(id))
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }
        Ok(())
    }

    async fn restore(&self, id: ArticleId, at: DateTime<Utc>) -> DomainResult<Article> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        // The partial slug index rejects this when a live article reused the slug.
        let restored = sqlx::query_scalar::<_, i64>(
            "UPDATE articles SET deleted_at = NULL, updated_at = $2
             WHERE id = $1 AND deleted_at IS NOT NULL RETURNING id",
        )
        .bind(i64::from(id))
        .bind(at)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("deleted article not found".into()))?;

        let article = fetch_in_tx(&mut tx, restored).await?;
        tx.commit().await.map_err(map_sqlx)?;
        Ok(article)
    }

    async fn increment_view_count(&self, id: ArticleId) -> DomainResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            "UPDATE articles SET view_count = view_count + 1
             WHERE id = $1 AND deleted_at IS NULL RETURNING view_count",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("article not found".into()))?;

        u64::try_from(count).map_err(|_| DomainError::Persistence("negative view count".into()))
    }
}

impl PostgresArticleReadRepository {
    fn apply_conditions(builder: &mut QueryBuilder<'_, Postgres>, query: &ArticleListQuery) {
        if query.trashed {
            builder.push(" WHERE a.deleted_at IS NOT NULL");
        } else {
            builder.push(" WHERE a.deleted_at IS NULL");
        }

        match query.status {
            StatusFilter::Published => {
                builder.push(" AND a.published = TRUE");
            }
            StatusFilter::Draft => {
                builder.push(" AND a.published = FALSE");
            }
            StatusFilter::All => {}
        }

        if let Some(search) = query.search.as_deref() {
            let pattern = like_pattern(search);
            builder.push(" AND (a.title ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR a.excerpt ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR a.body ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }

        if let Some(category_id) = query.category_id {
            builder.push(" AND a.category_id = ");
            builder.push_bind(i64::from(category_id));
        }

        if let Some(tag_id) = query.tag_id {
            builder.push(
                " AND EXISTS (SELECT 1 FROM article_tags f WHERE f.article_id = a.id AND f.tag_id = ",
            );
            builder.push_bind(i64::from(tag_id));
            builder.push(")");
        }
    }

    fn apply_ordering(builder: &mut QueryBuilder<'_, Postgres>, query: &ArticleListQuery) {
        let column = match query.order_by {
            ArticleSortField::CreatedAt => "a.created_at",
            ArticleSortField::PublishedAt => "a.published_at",
            ArticleSortField::Title => "a.title",
            ArticleSortField::ViewCount => "a.view_count",
        };
        let direction = query.direction.as_sql();
        builder.push(format!(
            " ORDER BY {column} {direction} NULLS LAST, a.id {direction}"
        ));
    }
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleReadRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles a WHERE a.id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles a
             WHERE a.slug = $1 AND a.deleted_at IS NULL"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }

    async fn slug_taken(&self, slug: &str, exclude: Option<ArticleId>) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                 SELECT 1 FROM articles
                 WHERE slug = $1 AND deleted_at IS NULL
                   AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(slug)
        .bind(exclude.map(i64::from))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn list(&self, query: ArticleListQuery) -> DomainResult<Page<Article>> {
        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM articles a");
        Self::apply_conditions(&mut count, &query);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut select: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {ARTICLE_COLUMNS} FROM articles a"));
        Self::apply_conditions(&mut select, &query);
        Self::apply_ordering(&mut select, &query);
        select.push(" LIMIT ");
        select.push_bind(query.page.limit());
        select.push(" OFFSET ");
        select.push_bind(query.page.offset());

        let rows = select
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let items = rows
            .into_iter()
            .map(Article::try_from)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Page::new(
            items,
            u64::try_from(total).unwrap_or_default(),
            query.page,
        ))
    }
}
