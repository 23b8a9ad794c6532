// src/application/ports/mod.rs
//! Seams the use cases depend on; implementations live in `infrastructure`
//! and in the in-memory doubles under `tests/support`.
pub mod security;
pub mod storage;
pub mod time;
pub mod util;
pub mod view_marker;
