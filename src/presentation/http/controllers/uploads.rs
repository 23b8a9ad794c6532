// src/presentation/http/controllers/uploads.rs
use crate::application::dto::UploadDto;
use crate::presentation::http::controllers::articles::uploaded_file;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, body::Bytes, http::HeaderMap};

/// Image upload used by the article editor; the body is the raw image.
#[utoipa::path(
    post,
    path = "/api/v1/uploads/images",
    request_body(content = Vec<u8>, description = "Raw image bytes", content_type = "image/*"),
    responses(
        (status = 200, description = "Image stored.", body = UploadDto),
        (status = 400, description = "Empty or non-image body.", body = crate::presentation::http::error::ErrorResponse),
        (status = 413, description = "Image exceeds the upload limit.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Missing uploads:create.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Uploads"
)]
pub async fn upload_image(
    Extension(state): Extension<HttpState>,
    user: Authenticated,
    headers: HeaderMap,
    body: Bytes,
) -> HttpResult<Json<UploadDto>> {
    state
        .services
        .upload_commands
        .upload_image(&user.actor(), uploaded_file(&headers, body))
        .await
        .into_http()
        .map(Json)
}
