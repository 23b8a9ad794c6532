// src/domain/slug.rs
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::errors::{DomainError, DomainResult};

pub const DEFAULT_MAX_SUFFIX: u32 = 1000;
pub const MAX_SLUG_LENGTH: usize = 255;
/// A slug collision on the final write is retried once against fresh state.
pub const SLUG_WRITE_ATTEMPTS: u32 = 2;

pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;
}

/// Answers whether a slug is already used by a live (non-deleted) record.
/// Implementations exclude the record being edited, if any.
#[async_trait]
pub trait SlugChecker: Send + Sync {
    async fn is_taken(&self, slug: &str) -> DomainResult<bool>;
}

/// Checks that `value` is already in URL-safe slug form.
pub fn validate_slug(value: &str) -> DomainResult<()> {
    if value.is_empty() {
        return Err(DomainError::Validation("slug cannot be empty".into()));
    }
    if value.len() > MAX_SLUG_LENGTH {
        return Err(DomainError::Validation(format!(
            "slug must be at most {MAX_SLUG_LENGTH} characters"
        )));
    }
    let well_formed = value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--");
    if !well_formed {
        return Err(DomainError::Validation(format!(
            "slug '{value}' may only contain lowercase letters, digits and single hyphens"
        )));
    }
    Ok(())
}

/// Longest prefix of `slug` within `max` bytes, without a trailing hyphen.
fn fit_slug(slug: &str, max: usize) -> &str {
    if slug.len() <= max {
        return slug;
    }
    let mut end = max;
    while !slug.is_char_boundary(end) {
        end -= 1;
    }
    slug[..end].trim_end_matches('-')
}

/// Produces slugs that are free at check time: the base slug first, then
/// `base-1`, `base-2`, ... up to the configured suffix bound.
#[derive(Clone)]
pub struct SlugResolver {
    generator: Arc<dyn SlugGenerator>,
    max_suffix: u32,
}

impl SlugResolver {
    pub fn new(generator: Arc<dyn SlugGenerator>, max_suffix: u32) -> Self {
        Self {
            generator,
            max_suffix,
        }
    }

    /// Base slug before any uniqueness suffix. An explicit candidate wins over
    /// the title; a title that slugifies to nothing falls back to
    /// `<fallback_prefix>-<unix timestamp>`. Derived slugs are cut to length.
    fn base_slug(
        &self,
        candidate: Option<&str>,
        title: &str,
        fallback_prefix: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<String> {
        if let Some(candidate) = candidate.map(str::trim).filter(|c| !c.is_empty()) {
            validate_slug(candidate)?;
            return Ok(candidate.to_string());
        }

        let derived = self.generator.slugify(title);
        let base = if derived.is_empty() {
            format!("{fallback_prefix}-{}", now.timestamp())
        } else {
            fit_slug(&derived, MAX_SLUG_LENGTH).to_string()
        };
        validate_slug(&base)?;
        Ok(base)
    }

    pub async fn resolve(
        &self,
        candidate: Option<&str>,
        title: &str,
        fallback_prefix: &str,
        now: DateTime<Utc>,
        checker: &dyn SlugChecker,
    ) -> DomainResult<String> {
        let base = self.base_slug(candidate, title, fallback_prefix, now)?;

        if !checker.is_taken(&base).await? {
            return Ok(base);
        }

        for suffix in 1..=self.max_suffix {
            let tail = format!("-{suffix}");
            let candidate = format!("{}{tail}", fit_slug(&base, MAX_SLUG_LENGTH - tail.len()));
            if !checker.is_taken(&candidate).await? {
                return Ok(candidate);
            }
        }

        tracing::warn!(base = %base, max_suffix = self.max_suffix, "slug suffix search exhausted");
        Err(DomainError::SlugExhausted {
            base,
            attempts: self.max_suffix + 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    struct Lowercase;

    impl SlugGenerator for Lowercase {
        fn slugify(&self, input: &str) -> String {
            input
                .split(|c: char| !c.is_ascii_alphanumeric())
                .filter(|part| !part.is_empty())
                .map(str::to_ascii_lowercase)
                .collect::<Vec<_>>()
                .join("-")
        }
    }

    struct SetChecker {
        taken: HashSet<String>,
        calls: Mutex<Vec<String>>,
    }

    impl SetChecker {
        fn new(taken: &[&str]) -> Self {
            Self {
                taken: taken.iter().map(|s| s.to_string()).collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SlugChecker for SetChecker {
        async fn is_taken(&self, slug: &str) -> DomainResult<bool> {
            self.calls.lock().unwrap().push(slug.to_string());
            Ok(self.taken.contains(slug))
        }
    }

    fn resolver(max_suffix: u32) -> SlugResolver {
        SlugResolver::new(Arc::new(Lowercase), max_suffix)
    }

    #[tokio::test]
    async fn free_base_is_checked_once() {
        let checker = SetChecker::new(&[]);
        let slug = resolver(10)
            .resolve(None, "Robot Line Follower!!", "article", Utc::now(), &checker)
            .await
            .unwrap();
        assert_eq!(slug, "robot-line-follower");
        assert_eq!(checker.calls(), vec!["robot-line-follower".to_string()]);
    }

    #[tokio::test]
    async fn taken_base_gets_first_suffix() {
        let checker = SetChecker::new(&["arm"]);
        let slug = resolver(10)
            .resolve(None, "Arm", "article", Utc::now(), &checker)
            .await
            .unwrap();
        assert_eq!(slug, "arm-1");
    }

    #[tokio::test]
    async fn suffix_search_is_dense() {
        let taken: Vec<String> = std::iter::once("arm".to_string())
            .chain((1..=9).map(|n| format!("arm-{n}")))
            .collect();
        let refs: Vec<&str> = taken.iter().map(String::as_str).collect();
        let checker = SetChecker::new(&refs);
        let slug = resolver(100)
            .resolve(None, "arm", "article", Utc::now(), &checker)
            .await
            .unwrap();
        assert_eq!(slug, "arm-10");
        assert_eq!(checker.calls().len(), 11);
    }

    #[tokio::test]
    async fn explicit_candidate_wins_over_title() {
        let checker = SetChecker::new(&[]);
        let slug = resolver(10)
            .resolve(Some("custom-path"), "Other Title", "article", Utc::now(), &checker)
            .await
            .unwrap();
        assert_eq!(slug, "custom-path");
    }

    #[tokio::test]
    async fn blank_candidate_falls_back_to_title() {
        let checker = SetChecker::new(&[]);
        let slug = resolver(10)
            .resolve(Some("   "), "Sumo Bot", "article", Utc::now(), &checker)
            .await
            .unwrap();
        assert_eq!(slug, "sumo-bot");
    }

    #[tokio::test]
    async fn malformed_candidate_is_rejected() {
        let checker = SetChecker::new(&[]);
        let err = resolver(10)
            .resolve(Some("Not A Slug"), "t", "article", Utc::now(), &checker)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(checker.calls().is_empty());
    }

    #[tokio::test]
    async fn unsluggable_title_uses_timestamp_fallback() {
        let checker = SetChecker::new(&[]);
        let now = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let slug = resolver(10)
            .resolve(None, "!!!", "article", now, &checker)
            .await
            .unwrap();
        assert_eq!(slug, format!("article-{}", now.timestamp()));
    }

    #[tokio::test]
    async fn bounded_search_reports_exhaustion() {
        let checker = SetChecker::new(&["x", "x-1", "x-2", "x-3"]);
        let err = resolver(3)
            .resolve(None, "x", "article", Utc::now(), &checker)
            .await
            .unwrap_err();
        match err {
            DomainError::SlugExhausted { base, attempts } => {
                assert_eq!(base, "x");
                assert_eq!(attempts, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(checker.calls().len(), 4);
    }

    #[tokio::test]
    async fn long_titles_are_cut_to_the_limit() {
        let checker = SetChecker::new(&[]);
        let slug = resolver(10)
            .resolve(None, &"robot ".repeat(60), "article", Utc::now(), &checker)
            .await
            .unwrap();
        assert_eq!(slug.len(), MAX_SLUG_LENGTH);
        assert!(slug.starts_with("robot-robot-"));
        assert!(validate_slug(&slug).is_ok());
    }

    #[tokio::test]
    async fn suffix_is_kept_within_the_length_limit() {
        let base = "a".repeat(MAX_SLUG_LENGTH);
        let checker = SetChecker::new(&[base.as_str()]);
        let slug = resolver(10)
            .resolve(None, &base, "article", Utc::now(), &checker)
            .await
            .unwrap();
        assert_eq!(slug, format!("{}-1", "a".repeat(MAX_SLUG_LENGTH - 2)));
        assert!(validate_slug(&slug).is_ok());
    }

    #[tokio::test]
    async fn trimmed_base_drops_its_trailing_hyphen() {
        let base = format!("{}-bb", "a".repeat(252));
        let checker = SetChecker::new(&[base.as_str()]);
        let slug = resolver(10)
            .resolve(Some(&base), "ignored", "article", Utc::now(), &checker)
            .await
            .unwrap();
        assert_eq!(slug, format!("{}-1", "a".repeat(252)));
    }

    #[tokio::test]
    async fn zero_suffix_bound_only_tries_the_base() {
        let checker = SetChecker::new(&["arm"]);
        let err = resolver(0)
            .resolve(None, "arm", "article", Utc::now(), &checker)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::SlugExhausted { attempts: 1, .. }));
        assert_eq!(checker.calls(), vec!["arm".to_string()]);
    }

    #[test]
    fn validate_slug_rules() {
        assert!(validate_slug("robot-2024").is_ok());
        assert!(validate_slug("-lead").is_err());
        assert!(validate_slug("trail-").is_err());
        assert!(validate_slug("double--hyphen").is_err());
        assert!(validate_slug("Upper").is_err());
        assert!(validate_slug("").is_err());
    }
}
