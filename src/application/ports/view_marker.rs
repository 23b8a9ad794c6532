// src/application/ports/view_marker.rs
use crate::domain::article::ArticleId;

/// Issues and checks the per-article marker a viewer presents on repeat visits.
pub trait ViewMarkerCodec: Send + Sync {
    fn issue(&self, article_id: ArticleId) -> String;
    fn verify(&self, article_id: ArticleId, marker: &str) -> bool;
}
