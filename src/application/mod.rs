//! Use cases: commands mutate articles, terms, uploads and accounts; queries
//! read them. Both talk to storage only through `ports` and domain repositories.
pub mod commands;
pub mod dto;
pub mod error;
pub mod ports;
pub mod queries;
pub mod services;

pub use error::ApplicationResult;
