// src/domain/article/views.rs
use crate::domain::article::value_objects::ArticleId;

/// Lifetime of a per-article view marker: 365 days.
pub const VIEW_MARKER_TTL_SECS: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewDecision {
    pub article_id: ArticleId,
    pub should_increment: bool,
    pub marker_ttl_secs: i64,
}

/// A viewer without a valid marker counts once; one with a marker does not.
pub fn record_view(article_id: ArticleId, viewer_has_marker: bool) -> ViewDecision {
    ViewDecision {
        article_id,
        should_increment: !viewer_has_marker,
        marker_ttl_secs: VIEW_MARKER_TTL_SECS,
    }
}
