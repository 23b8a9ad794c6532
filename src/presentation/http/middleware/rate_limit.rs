// src/presentation/http/middleware/rate_limit.rs
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use std::sync::OnceLock;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

type LoginLimiter = GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>;

/// Limiter for credential endpoints, shared across routers built in-process.
/// `None` when the quota cannot be configured.
pub fn rate_limit_layer() -> Option<LoginLimiter> {
    static RATE_LIMITER: OnceLock<Option<LoginLimiter>> = OnceLock::new();

    RATE_LIMITER
        .get_or_init(|| {
            // Five attempts up front, then one more every twelve seconds per client IP.
            let mut builder = GovernorConfigBuilder::default();
            builder.per_second(12);
            builder.burst_size(5);
            let config = builder.key_extractor(SmartIpKeyExtractor).finish()?;

            Some(GovernorLayer::new(config))
        })
        .clone()
}
