// src/application/commands/taxonomy.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::{Actor, TermDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        slug::{SLUG_WRITE_ATTEMPTS, SlugResolver},
        taxonomy::{
            NewTerm, TaxonomyRepository, Term, TermId, TermKind, TermName, TermSlugChecker,
            TermUpdate,
        },
    },
};

#[derive(Debug, Clone)]
pub struct CreateTermCommand {
    pub kind: TermKind,
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RenameTermCommand {
    pub kind: TermKind,
    pub id: i64,
    pub name: String,
    pub slug: Option<String>,
}

pub struct TaxonomyCommandService {
    repo: Arc<dyn TaxonomyRepository>,
    resolver: SlugResolver,
    clock: Arc<dyn Clock>,
}

impl TaxonomyCommandService {
    pub fn new(
        repo: Arc<dyn TaxonomyRepository>,
        resolver: SlugResolver,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            resolver,
            clock,
        }
    }

    pub async fn create_term(
        &self,
        actor: &Actor,
        command: CreateTermCommand,
    ) -> ApplicationResult<TermDto> {
        ensure_manage(actor, command.kind)?;

        let name = TermName::new(command.name)?;
        let now = self.clock.now();

        let mut attempt = 1;
        loop {
            let slug = self
                .unique_slug(command.kind, command.slug.as_deref(), &name, None)
                .await?;

            let inserted = self
                .repo
                .insert(NewTerm {
                    kind: command.kind,
                    name: name.clone(),
                    slug,
                    created_at: now,
                })
                .await;
            match inserted {
                Ok(term) => {
                    tracing::info!(kind = %term.kind, term_id = term.id.0, slug = %term.slug, "term created");
                    return Ok(term.into());
                }
                Err(err) if err.is_slug_conflict() && attempt < SLUG_WRITE_ATTEMPTS => {
                    tracing::warn!(attempt, error = %err, "term slug taken concurrently, retrying");
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Renaming re-derives the slug unless one is given or the name is unchanged.
    pub async fn rename_term(
        &self,
        actor: &Actor,
        command: RenameTermCommand,
    ) -> ApplicationResult<TermDto> {
        ensure_manage(actor, command.kind)?;

        let id = TermId::new(command.id)?;
        let current = self.load(command.kind, id).await?;
        let name = TermName::new(command.name)?;

        let explicit = command.slug.filter(|slug| !slug.trim().is_empty());
        let keep_slug = explicit.is_none() && name == current.name;

        let mut attempt = 1;
        loop {
            let slug = if keep_slug {
                current.slug.clone()
            } else {
                self.unique_slug(command.kind, explicit.as_deref(), &name, Some(id))
                    .await?
            };

            let updated = self
                .repo
                .update(TermUpdate {
                    id,
                    kind: command.kind,
                    name: name.clone(),
                    slug,
                    updated_at: self.clock.now(),
                })
                .await;
            match updated {
                Ok(term) => {
                    tracing::info!(kind = %term.kind, term_id = term.id.0, "term renamed");
                    return Ok(term.into());
                }
                Err(err)
                    if !keep_slug && err.is_slug_conflict() && attempt < SLUG_WRITE_ATTEMPTS =>
                {
                    tracing::warn!(attempt, error = %err, "term slug taken concurrently, retrying");
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Articles keep existing; their category reference is cleared and tag links dropped.
    pub async fn delete_term(&self, actor: &Actor, kind: TermKind, id: i64) -> ApplicationResult<()> {
        ensure_manage(actor, kind)?;

        let id = TermId::new(id)?;
        self.load(kind, id).await?;
        self.repo.delete(kind, id).await?;
        tracing::info!(kind = %kind, term_id = id.0, "term deleted");
        Ok(())
    }

    async fn load(&self, kind: TermKind, id: TermId) -> ApplicationResult<Term> {
        self.repo
            .find_by_id(kind, id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("{kind} not found")))
    }

    async fn unique_slug(
        &self,
        kind: TermKind,
        candidate: Option<&str>,
        name: &TermName,
        exclude: Option<TermId>,
    ) -> ApplicationResult<String> {
        let checker = TermSlugChecker::new(self.repo.as_ref(), kind, exclude);
        let slug = self
            .resolver
            .resolve(candidate, name.as_str(), kind.as_str(), self.clock.now(), &checker)
            .await?;
        Ok(slug)
    }
}

fn ensure_manage(actor: &Actor, kind: TermKind) -> ApplicationResult<()> {
    if actor.has_capability(kind.plural(), "manage") {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(format!(
            "missing capability {}:manage",
            kind.plural()
        )))
    }
}
