use anyhow::Result;
use robotika_cms::application::{
    ports::{
        security::{PasswordHasher, TokenManager},
        storage::FileStorage,
        time::Clock,
        util::SlugGenerator,
        view_marker::ViewMarkerCodec,
    },
    services::{ApplicationServices, ServiceSettings},
};
use robotika_cms::config::AppConfig;
use robotika_cms::domain::{
    article::{ArticleReadRepository, ArticleWriteRepository},
    taxonomy::TaxonomyRepository,
    user::{UserId, UserRepository},
};
use robotika_cms::infrastructure::{
    database,
    repositories::{
        PostgresArticleReadRepository, PostgresArticleWriteRepository,
        PostgresTaxonomyRepository, PostgresUserRepository,
    },
    security::{
        password::Argon2PasswordHasher, token::BiscuitTokenManager,
        view_marker::HmacViewMarkerCodec,
    },
    storage::LocalFileStorage,
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use robotika_cms::presentation::http::{
    routes::build_router,
    state::{HttpSettings, HttpState, StaticUploads},
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let article_write_repo: Arc<dyn ArticleWriteRepository> =
        Arc::new(PostgresArticleWriteRepository::new(pool.clone()));
    let article_read_repo: Arc<dyn ArticleReadRepository> =
        Arc::new(PostgresArticleReadRepository::new(pool.clone()));
    let taxonomy_repo: Arc<dyn TaxonomyRepository> =
        Arc::new(PostgresTaxonomyRepository::new(pool));

    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::default());
    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let view_markers: Arc<dyn ViewMarkerCodec> = match config.view_marker_secret() {
        Some(secret) => Arc::new(HmacViewMarkerCodec::new(secret.as_bytes())?),
        None => {
            tracing::warn!("VIEW_MARKER_SECRET unset; view markers reset on restart");
            Arc::new(HmacViewMarkerCodec::ephemeral()?)
        }
    };
    let storage: Arc<dyn FileStorage> = Arc::new(LocalFileStorage::new(
        config.upload_dir().clone(),
        config.public_upload_url(),
    ));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);

    let services = Arc::new(ApplicationServices::new(
        user_repo,
        article_write_repo,
        article_read_repo,
        taxonomy_repo,
        password_hasher,
        token_manager,
        storage,
        view_markers,
        clock,
        slugger,
        ServiceSettings {
            max_upload_bytes: config.max_upload_bytes(),
            slug_max_suffix: config.slug_max_suffix(),
            system_user: UserId(config.system_user_id()),
        },
    ));

    let uploads = upload_route(config.public_upload_url()).map(|route| StaticUploads {
        dir: config.upload_dir().clone(),
        route,
    });
    let state = HttpState {
        services,
        settings: Arc::new(HttpSettings {
            allowed_origins: config.allowed_origins().to_vec(),
            uploads,
            max_upload_bytes: config.max_upload_bytes(),
            secure_cookies: config.secure_cookies(),
            rate_limit_auth: config.rate_limit_enabled(),
        }),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Uploads are served locally only when the public URL is a path on this host.
fn upload_route(public_url: &str) -> Option<String> {
    let route = public_url.trim_end_matches('/');
    (route.starts_with('/') && route.len() > 1).then(|| route.to_string())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
