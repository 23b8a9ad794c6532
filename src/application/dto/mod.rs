pub mod articles;
pub mod auth;
pub mod pagination;
pub mod taxonomy;
pub mod uploads;
pub mod users;

pub use articles::ArticleDto;
pub use auth::{Actor, AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use pagination::{ListFilters, PageDto, PageMeta};
pub use taxonomy::TermDto;
pub use uploads::UploadDto;
pub use users::{CapabilityView, UserDto, UserProfileDto};
