use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Shape expected by the rich-text editor's upload adapter.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadDto {
    pub uploaded: bool,
    pub path: String,
    pub url: String,
}
