// tests/support/mocks/store.rs
//! In-memory stand-in for the Postgres repositories. It mirrors the
//! constraints the schema enforces: live article slugs are unique, term slugs
//! are unique per kind, usernames are unique, and deleting a term clears the
//! references articles hold to it.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use robotika_cms::domain::article::{
    Article, ArticleId, ArticleListQuery, ArticleReadRepository, ArticleSlug, ArticleSortField,
    ArticleUpdate, ArticleWriteRepository, NewArticle,
};
use robotika_cms::domain::errors::{DomainError, DomainResult};
use robotika_cms::domain::listing::{Page, PageRequest, SortDirection};
use robotika_cms::domain::taxonomy::{
    NewTerm, TaxonomyRepository, Term, TermId, TermKind, TermListQuery, TermName, TermSortField,
    TermUpdate,
};
use robotika_cms::domain::user::{
    NewUser, PasswordHash, Role, User, UserId, UserRepository, Username,
};
use std::sync::Mutex;

#[derive(Default)]
struct State {
    articles: Vec<Article>,
    terms: Vec<Term>,
    users: Vec<User>,
    next_article_id: i64,
    next_term_id: i64,
    next_user_id: i64,
    /// Inserts that fail with a slug conflict before any check, simulating
    /// a concurrent writer winning the race.
    forced_slug_conflicts: u32,
    /// Same, for category and tag writes.
    forced_term_slug_conflicts: u32,
    /// Article updates that fail as if another writer got there first.
    forced_update_conflicts: u32,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

fn page_slice<T: Clone>(items: &[T], page: PageRequest) -> Vec<T> {
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    items.iter().skip(offset).take(limit).cloned().collect()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn force_slug_conflicts(&self, count: u32) {
        self.state.lock().unwrap().forced_slug_conflicts = count;
    }

    pub fn force_term_slug_conflicts(&self, count: u32) {
        self.state.lock().unwrap().forced_term_slug_conflicts = count;
    }

    pub fn force_update_conflicts(&self, count: u32) {
        self.state.lock().unwrap().forced_update_conflicts = count;
    }

    pub fn article(&self, id: i64) -> Option<Article> {
        self.state
            .lock()
            .unwrap()
            .articles
            .iter()
            .find(|a| a.id.0 == id)
            .cloned()
    }

    /// Seeds a user whose password hashes with the strict test hasher.
    pub fn seed_user(&self, username: &str, password: &str, role: Role) -> User {
        let mut state = self.state.lock().unwrap();
        state.next_user_id += 1;
        let user = User {
            id: UserId(state.next_user_id),
            username: Username::new(username).unwrap(),
            password_hash: PasswordHash::new(format!("hash::{password}")).unwrap(),
            role,
            is_active: true,
            created_at: super::time::fixed_now(),
        };
        state.users.push(user.clone());
        user
    }

    pub fn seed_term(&self, kind: TermKind, name: &str, slug: &str) -> Term {
        let mut state = self.state.lock().unwrap();
        state.next_term_id += 1;
        let term = Term {
            id: TermId(state.next_term_id),
            kind,
            name: TermName::new(name).unwrap(),
            slug: slug.to_string(),
            created_at: super::time::fixed_now(),
            updated_at: super::time::fixed_now(),
        };
        state.terms.push(term.clone());
        term
    }
}

fn live_slug_owner(articles: &[Article], slug: &str, exclude: Option<ArticleId>) -> bool {
    articles
        .iter()
        .any(|a| !a.is_deleted() && a.slug.as_str() == slug && Some(a.id) != exclude)
}

fn term_slug_owner(terms: &[Term], kind: TermKind, slug: &str, exclude: Option<TermId>) -> bool {
    terms
        .iter()
        .any(|t| t.kind == kind && t.slug == slug && Some(t.id) != exclude)
}

fn term_slug_conflict(kind: TermKind, slug: &str) -> DomainError {
    DomainError::SlugConflict(format!("{kind} slug '{slug}' is already in use"))
}

fn slug_conflict(slug: &str) -> DomainError {
    DomainError::SlugConflict(format!("slug '{slug}' is already in use"))
}

#[async_trait]
impl ArticleWriteRepository for MemoryStore {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let mut state = self.state.lock().unwrap();
        if state.forced_slug_conflicts > 0 {
            state.forced_slug_conflicts -= 1;
            return Err(slug_conflict(article.slug.as_str()));
        }
        if live_slug_owner(&state.articles, article.slug.as_str(), None) {
            return Err(slug_conflict(article.slug.as_str()));
        }

        state.next_article_id += 1;
        let created = Article {
            id: ArticleId(state.next_article_id),
            title: article.title,
            slug: article.slug,
            excerpt: article.excerpt,
            body: article.body,
            cover_image_path: article.cover_image_path,
            category_id: article.category_id,
            tag_ids: article.tag_ids,
            author_id: article.author_id,
            published: article.published,
            published_at: article.published_at,
            view_count: 0,
            created_at: article.created_at,
            updated_at: article.updated_at,
            deleted_at: None,
        };
        state.articles.push(created.clone());
        Ok(created)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let mut state = self.state.lock().unwrap();
        if state.forced_update_conflicts > 0 {
            state.forced_update_conflicts -= 1;
            return Err(DomainError::Conflict(
                "article was modified concurrently".into(),
            ));
        }
        let taken = update
            .slug
            .as_ref()
            .filter(|slug| live_slug_owner(&state.articles, slug.as_str(), Some(update.id)));
        if let Some(slug) = taken {
            return Err(slug_conflict(slug.as_str()));
        }

        let article = state
            .articles
            .iter_mut()
            .find(|a| a.id == update.id && !a.is_deleted())
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        if article.updated_at != update.original_updated_at {
            return Err(DomainError::Conflict(
                "article was modified concurrently".into(),
            ));
        }

        if let Some(title) = update.title {
            article.title = title;
        }
        if let Some(slug) = update.slug {
            article.slug = slug;
        }
        if let Some(excerpt) = update.excerpt {
            article.excerpt = excerpt;
        }
        if let Some(body) = update.body {
            article.body = body;
        }
        if let Some(cover) = update.cover_image_path {
            article.cover_image_path = cover;
        }
        if let Some(category) = update.category_id {
            article.category_id = category;
        }
        if let Some(tags) = update.tag_ids {
            article.tag_ids = tags;
        }
        if let Some(publish) = update.publish_state {
            article.published = publish.published;
            article.published_at = publish.published_at;
        }
        article.updated_at = update.updated_at;
        Ok(article.clone())
    }

    async fn soft_delete(&self, id: ArticleId, at: DateTime<Utc>) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        let article = state
            .articles
            .iter_mut()
            .find(|a| a.id == id && !a.is_deleted())
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        article.deleted_at = Some(at);
        article.updated_at = at;
        Ok(())
    }

    async fn restore(&self, id: ArticleId, at: DateTime<Utc>) -> DomainResult<Article> {
        let mut state = self.state.lock().unwrap();
        let slug = state
            .articles
            .iter()
            .find(|a| a.id == id && a.is_deleted())
            .map(|a| a.slug.as_str().to_string())
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        if live_slug_owner(&state.articles, &slug, Some(id)) {
            return Err(slug_conflict(&slug));
        }

        let article = state
            .articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        article.deleted_at = None;
        article.updated_at = at;
        Ok(article.clone())
    }

    async fn increment_view_count(&self, id: ArticleId) -> DomainResult<u64> {
        let mut state = self.state.lock().unwrap();
        let article = state
            .articles
            .iter_mut()
            .find(|a| a.id == id && !a.is_deleted())
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        article.view_count += 1;
        Ok(article.view_count)
    }
}

fn matches_search(article: &Article, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    article.title.as_str().to_lowercase().contains(&needle)
        || article.body.as_str().to_lowercase().contains(&needle)
        || article
            .excerpt
            .as_ref()
            .is_some_and(|e| e.as_str().to_lowercase().contains(&needle))
}

#[async_trait]
impl ArticleReadRepository for MemoryStore {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .articles
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .articles
            .iter()
            .find(|a| !a.is_deleted() && a.slug == *slug)
            .cloned())
    }

    async fn slug_taken(&self, slug: &str, exclude: Option<ArticleId>) -> DomainResult<bool> {
        Ok(live_slug_owner(
            &self.state.lock().unwrap().articles,
            slug,
            exclude,
        ))
    }

    async fn list(&self, query: ArticleListQuery) -> DomainResult<Page<Article>> {
        let state = self.state.lock().unwrap();
        let mut items: Vec<Article> = state
            .articles
            .iter()
            .filter(|a| a.is_deleted() == query.trashed)
            .filter(|a| query.status.matches(a.published))
            .filter(|a| query.search.as_deref().is_none_or(|s| matches_search(a, s)))
            .filter(|a| query.category_id.is_none_or(|c| a.category_id == Some(c)))
            .filter(|a| query.tag_id.is_none_or(|t| a.tag_ids.contains(&t)))
            .cloned()
            .collect();

        items.sort_by(|a, b| {
            let ordering = match query.order_by {
                ArticleSortField::CreatedAt => a.created_at.cmp(&b.created_at),
                ArticleSortField::PublishedAt => a.published_at.cmp(&b.published_at),
                ArticleSortField::Title => a.title.as_str().cmp(b.title.as_str()),
                ArticleSortField::ViewCount => a.view_count.cmp(&b.view_count),
            }
            .then(a.id.cmp(&b.id));
            match query.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let total = items.len() as u64;
        Ok(Page::new(page_slice(&items, query.page), total, query.page))
    }
}

#[async_trait]
impl TaxonomyRepository for MemoryStore {
    async fn insert(&self, term: NewTerm) -> DomainResult<Term> {
        let mut state = self.state.lock().unwrap();
        if state.forced_term_slug_conflicts > 0 {
            state.forced_term_slug_conflicts -= 1;
            return Err(term_slug_conflict(term.kind, &term.slug));
        }
        if term_slug_owner(&state.terms, term.kind, &term.slug, None) {
            return Err(term_slug_conflict(term.kind, &term.slug));
        }
        state.next_term_id += 1;
        let created = Term {
            id: TermId(state.next_term_id),
            kind: term.kind,
            name: term.name,
            slug: term.slug,
            created_at: term.created_at,
            updated_at: term.created_at,
        };
        state.terms.push(created.clone());
        Ok(created)
    }

    async fn update(&self, update: TermUpdate) -> DomainResult<Term> {
        let mut state = self.state.lock().unwrap();
        if state.forced_term_slug_conflicts > 0 {
            state.forced_term_slug_conflicts -= 1;
            return Err(term_slug_conflict(update.kind, &update.slug));
        }
        if term_slug_owner(&state.terms, update.kind, &update.slug, Some(update.id)) {
            return Err(term_slug_conflict(update.kind, &update.slug));
        }
        let term = state
            .terms
            .iter_mut()
            .find(|t| t.kind == update.kind && t.id == update.id)
            .ok_or_else(|| DomainError::NotFound(format!("{} not found", update.kind)))?;
        term.name = update.name;
        term.slug = update.slug;
        term.updated_at = update.updated_at;
        Ok(term.clone())
    }

    async fn delete(&self, kind: TermKind, id: TermId) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.terms.len();
        state.terms.retain(|t| !(t.kind == kind && t.id == id));
        if state.terms.len() == before {
            return Err(DomainError::NotFound(format!("{kind} not found")));
        }
        for article in &mut state.articles {
            match kind {
                TermKind::Category if article.category_id == Some(id) => {
                    article.category_id = None;
                }
                TermKind::Tag => article.tag_ids.retain(|t| *t != id),
                _ => {}
            }
        }
        Ok(())
    }

    async fn find_by_id(&self, kind: TermKind, id: TermId) -> DomainResult<Option<Term>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .terms
            .iter()
            .find(|t| t.kind == kind && t.id == id)
            .cloned())
    }

    async fn slug_taken(
        &self,
        kind: TermKind,
        slug: &str,
        exclude: Option<TermId>,
    ) -> DomainResult<bool> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .terms
            .iter()
            .any(|t| t.kind == kind && t.slug == slug && Some(t.id) != exclude))
    }

    async fn list(&self, query: TermListQuery) -> DomainResult<Page<Term>> {
        let state = self.state.lock().unwrap();
        let mut items: Vec<Term> = state
            .terms
            .iter()
            .filter(|t| t.kind == query.kind)
            .filter(|t| {
                query.search.as_deref().is_none_or(|s| {
                    t.name.as_str().to_lowercase().contains(&s.to_lowercase())
                })
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            let ordering = match query.order_by {
                TermSortField::Name => a.name.as_str().cmp(b.name.as_str()),
                TermSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            }
            .then(a.id.cmp(&b.id));
            match query.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        let total = items.len() as u64;
        Ok(Page::new(page_slice(&items, query.page), total, query.page))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn count(&self) -> DomainResult<u64> {
        Ok(self.state.lock().unwrap().users.len() as u64)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|u| u.username == new_user.username) {
            return Err(DomainError::Conflict("username already exists".into()));
        }
        state.next_user_id += 1;
        let user = User {
            id: UserId(state.next_user_id),
            username: new_user.username,
            password_hash: new_user.password_hash,
            role: new_user.role,
            is_active: new_user.is_active,
            created_at: new_user.created_at,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.username == *username)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }
}
