// tests/support/mocks/mod.rs
pub mod security;
pub mod store;
pub mod time;
pub mod util;

pub use security::{
    ADMIN_ID, ADMIN_TOKEN, AUTHOR_ID, AUTHOR_TOKEN, DummyTokenManager, OTHER_AUTHOR_ID,
    OTHER_AUTHOR_TOKEN, StrictPasswordHasher, admin, author, other_author,
};
pub use store::MemoryStore;
pub use time::{ManualClock, fixed_now};
pub use util::MemoryStorage;
