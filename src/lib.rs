// src/lib.rs
//! Content backend for the robotics club site: articles with unique slugs,
//! categories and tags, image uploads and deduplicated view counting.
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
