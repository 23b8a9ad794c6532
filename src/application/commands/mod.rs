pub mod articles;
pub mod taxonomy;
pub mod uploads;
pub mod users;
