// src/domain/article/publishing.rs
use chrono::{DateTime, Utc};

/// Publish dimension of an article: `Draft` when `published` is false,
/// `Published` otherwise. `published_at` survives unpublishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublishState {
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

impl PublishState {
    pub fn draft() -> Self {
        Self::default()
    }

    pub fn new(published: bool, published_at: Option<DateTime<Utc>>) -> Self {
        Self {
            published,
            published_at,
        }
    }

    /// Applies a publish request. Only a draft-to-published step stamps
    /// `published_at`; everything else leaves the timestamp alone.
    pub fn transition(self, requested_published: bool, now: DateTime<Utc>) -> Self {
        match (self.published, requested_published) {
            (false, true) => Self {
                published: true,
                published_at: Some(now),
            },
            (true, true) => self,
            (_, false) => Self {
                published: false,
                published_at: self.published_at,
            },
        }
    }
}

pub fn apply_publish_transition(
    current: PublishState,
    requested_published: bool,
    now: DateTime<Utc>,
) -> PublishState {
    current.transition(requested_published, now)
}
