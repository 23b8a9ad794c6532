// src/application/commands/articles/capability.rs
use crate::{
    application::{
        dto::Actor,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{Article, specifications::ArticleOwnershipSpec},
};

pub(super) fn ensure_capability(
    actor: &Actor,
    resource: &str,
    action: &str,
) -> ApplicationResult<()> {
    if actor.has_capability(resource, action) {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(format!(
            "missing capability {resource}:{action}"
        )))
    }
}

/// `action` is one of `update`, `delete`, `restore`.
pub(super) fn ensure_owns_or_any(
    actor: &Actor,
    article: &Article,
    action: &'static str,
) -> ApplicationResult<()> {
    let Some(user) = actor.user() else {
        return Ok(());
    };
    let spec = ArticleOwnershipSpec::new(&user.capabilities, article, user.id, action);
    if spec.is_satisfied() {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(format!(
            "insufficient privileges to {action} article"
        )))
    }
}
