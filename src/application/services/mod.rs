// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        commands::{
            articles::{ArticleCommandService, ArticleCommandSettings},
            taxonomy::TaxonomyCommandService,
            uploads::UploadCommandService,
            users::UserCommandService,
        },
        dto::AuthenticatedUser,
        ports::{
            security::{PasswordHasher, TokenManager},
            storage::FileStorage,
            time::Clock,
            util::SlugGenerator,
            view_marker::ViewMarkerCodec,
        },
        queries::{
            articles::ArticleQueryService, taxonomy::TaxonomyQueryService,
            users::UserQueryService,
        },
    },
    domain::{
        article::{ArticleReadRepository, ArticleWriteRepository, services::ArticleSlugService},
        slug::{DEFAULT_MAX_SUFFIX, SlugResolver},
        taxonomy::TaxonomyRepository,
        user::{UserId, UserRepository},
    },
};

/// Tunables shared by the command services.
#[derive(Debug, Clone, Copy)]
pub struct ServiceSettings {
    pub max_upload_bytes: usize,
    pub slug_max_suffix: u32,
    /// Author recorded for commands issued by [`crate::application::dto::Actor::System`].
    pub system_user: UserId,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            max_upload_bytes: 5 * 1024 * 1024,
            slug_max_suffix: DEFAULT_MAX_SUFFIX,
            system_user: UserId(1),
        }
    }
}

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub user_queries: Arc<UserQueryService>,
    pub article_commands: Arc<ArticleCommandService>,
    pub article_queries: Arc<ArticleQueryService>,
    pub taxonomy_commands: Arc<TaxonomyCommandService>,
    pub taxonomy_queries: Arc<TaxonomyQueryService>,
    pub upload_commands: Arc<UploadCommandService>,
    token_manager: Arc<dyn TokenManager>,
    clock: Arc<dyn Clock>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        article_write_repo: Arc<dyn ArticleWriteRepository>,
        article_read_repo: Arc<dyn ArticleReadRepository>,
        taxonomy_repo: Arc<dyn TaxonomyRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        storage: Arc<dyn FileStorage>,
        view_markers: Arc<dyn ViewMarkerCodec>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
        settings: ServiceSettings,
    ) -> Self {
        let resolver = SlugResolver::new(Arc::clone(&slugger), settings.slug_max_suffix);

        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&token_manager),
            Arc::clone(&clock),
        ));
        let user_queries = Arc::new(UserQueryService::new(
            Arc::clone(&user_repo),
            Arc::clone(&clock),
        ));

        let slug_service = Arc::new(ArticleSlugService::new(
            Arc::clone(&article_read_repo),
            resolver.clone(),
        ));

        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&article_write_repo),
            Arc::clone(&article_read_repo),
            Arc::clone(&taxonomy_repo),
            slug_service,
            Arc::clone(&storage),
            view_markers,
            Arc::clone(&clock),
            ArticleCommandSettings {
                system_user: settings.system_user,
                max_upload_bytes: settings.max_upload_bytes,
            },
        ));
        let article_queries = Arc::new(ArticleQueryService::new(Arc::clone(&article_read_repo)));

        let taxonomy_commands = Arc::new(TaxonomyCommandService::new(
            Arc::clone(&taxonomy_repo),
            resolver,
            Arc::clone(&clock),
        ));
        let taxonomy_queries = Arc::new(TaxonomyQueryService::new(taxonomy_repo));

        let upload_commands = Arc::new(UploadCommandService::new(
            storage,
            settings.max_upload_bytes,
        ));

        Self {
            user_commands,
            user_queries,
            article_commands,
            article_queries,
            taxonomy_commands,
            taxonomy_queries,
            upload_commands,
            token_manager,
            clock,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Resolves a raw bearer token into the acting user.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.token_manager.authenticate(token).await
    }
}
