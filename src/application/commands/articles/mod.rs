// src/application/commands/articles/mod.rs
mod capability;
mod cover;
mod create;
mod delete;
mod publish;
mod service;
mod update;
mod views;

pub use cover::AttachCoverImageCommand;
pub use create::{CreateArticleCommand, CreateArticleCommandBuilder};
pub use delete::{DeleteArticleCommand, RestoreArticleCommand};
pub use publish::SetPublishStateCommand;
pub use service::{ArticleCommandService, ArticleCommandSettings};
pub use update::UpdateArticleCommand;
pub use views::{IssuedViewMarker, RecordViewCommand, ViewOutcome};
