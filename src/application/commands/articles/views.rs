// src/application/commands/articles/views.rs
use super::ArticleCommandService;
use crate::{
    application::error::ApplicationResult,
    domain::article::{ArticleId, record_view},
};

#[derive(Debug, Clone)]
pub struct RecordViewCommand {
    pub article_id: i64,
    /// Marker value the viewer presented, if any.
    pub marker: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedViewMarker {
    pub value: String,
    pub ttl_secs: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewOutcome {
    /// Count after the increment; `None` when the view was not counted.
    pub view_count: Option<u64>,
    pub marker: Option<IssuedViewMarker>,
}

impl ArticleCommandService {
    pub async fn record_view(&self, command: RecordViewCommand) -> ApplicationResult<ViewOutcome> {
        let id = ArticleId::new(command.article_id)?;
        let has_marker = command
            .marker
            .as_deref()
            .is_some_and(|value| self.view_markers.verify(id, value));

        let decision = record_view(id, has_marker);
        if !decision.should_increment {
            return Ok(ViewOutcome::default());
        }

        let view_count = self.write_repo.increment_view_count(id).await?;
        tracing::debug!(article_id = id.0, view_count, "article view counted");

        Ok(ViewOutcome {
            view_count: Some(view_count),
            marker: Some(IssuedViewMarker {
                value: self.view_markers.issue(id),
                ttl_secs: decision.marker_ttl_secs,
            }),
        })
    }
}
