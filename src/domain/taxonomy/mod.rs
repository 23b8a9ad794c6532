// src/domain/taxonomy/mod.rs
//! Categories and tags share one shape: a named, slugged term.
pub mod entity;
pub mod repository;
pub mod services;

pub use entity::{NewTerm, Term, TermId, TermKind, TermName, TermUpdate};
pub use repository::{TaxonomyRepository, TermListQuery, TermSortField};
pub use services::TermSlugChecker;
