// src/application/commands/articles/service.rs
use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::{storage::FileStorage, time::Clock, view_marker::ViewMarkerCodec},
    },
    domain::{
        article::{
            Article, ArticleId, ArticleReadRepository, ArticleWriteRepository,
            normalize_tag_ids, services::ArticleSlugService,
        },
        taxonomy::{TaxonomyRepository, TermId, TermKind},
        user::UserId,
    },
};

#[derive(Debug, Clone, Copy)]
pub struct ArticleCommandSettings {
    pub system_user: UserId,
    pub max_upload_bytes: usize,
}

pub struct ArticleCommandService {
    pub(super) write_repo: Arc<dyn ArticleWriteRepository>,
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) taxonomy_repo: Arc<dyn TaxonomyRepository>,
    pub(super) slug_service: Arc<ArticleSlugService>,
    pub(super) storage: Arc<dyn FileStorage>,
    pub(super) view_markers: Arc<dyn ViewMarkerCodec>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) settings: ArticleCommandSettings,
}

impl ArticleCommandService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        write_repo: Arc<dyn ArticleWriteRepository>,
        read_repo: Arc<dyn ArticleReadRepository>,
        taxonomy_repo: Arc<dyn TaxonomyRepository>,
        slug_service: Arc<ArticleSlugService>,
        storage: Arc<dyn FileStorage>,
        view_markers: Arc<dyn ViewMarkerCodec>,
        clock: Arc<dyn Clock>,
        settings: ArticleCommandSettings,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            taxonomy_repo,
            slug_service,
            storage,
            view_markers,
            clock,
            settings,
        }
    }

    /// Loads a live (not soft-deleted) article.
    pub(super) async fn load_live(&self, id: ArticleId) -> ApplicationResult<Article> {
        self.read_repo
            .find_by_id(id)
            .await?
            .filter(|article| !article.is_deleted())
            .ok_or_else(|| ApplicationError::not_found("article not found"))
    }

    pub(super) async fn resolve_category(
        &self,
        category_id: Option<i64>,
    ) -> ApplicationResult<Option<TermId>> {
        let Some(raw) = category_id else {
            return Ok(None);
        };
        let id = TermId::new(raw)?;
        self.ensure_term_exists(TermKind::Category, id).await?;
        Ok(Some(id))
    }

    pub(super) async fn resolve_tags(&self, tag_ids: Vec<i64>) -> ApplicationResult<Vec<TermId>> {
        let ids = tag_ids
            .into_iter()
            .map(TermId::new)
            .collect::<Result<Vec<_>, _>>()?;
        let ids = normalize_tag_ids(ids);
        for id in &ids {
            self.ensure_term_exists(TermKind::Tag, *id).await?;
        }
        Ok(ids)
    }

    async fn ensure_term_exists(&self, kind: TermKind, id: TermId) -> ApplicationResult<()> {
        if self.taxonomy_repo.find_by_id(kind, id).await?.is_none() {
            return Err(ApplicationError::not_found(format!(
                "{kind} {} not found",
                i64::from(id)
            )));
        }
        Ok(())
    }
}
