pub mod articles;
pub mod taxonomy;
pub mod users;
