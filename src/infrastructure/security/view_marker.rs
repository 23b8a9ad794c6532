// src/infrastructure/security/view_marker.rs
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::view_marker::ViewMarkerCodec,
};
use crate::domain::article::ArticleId;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Marker value is `base64url(HMAC-SHA256(secret, "article-view:<id>"))`, so a
/// marker for one article is useless for another.
#[derive(Clone)]
pub struct HmacViewMarkerCodec {
    mac: HmacSha256,
}

impl HmacViewMarkerCodec {
    pub fn new(secret: &[u8]) -> ApplicationResult<Self> {
        if secret.is_empty() {
            return Err(ApplicationError::infrastructure(
                "view marker secret cannot be empty",
            ));
        }
        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(Self { mac })
    }

    /// Per-process secret; markers stop verifying after a restart.
    pub fn ephemeral() -> ApplicationResult<Self> {
        let mut secret = Vec::with_capacity(32);
        secret.extend_from_slice(Uuid::new_v4().as_bytes());
        secret.extend_from_slice(Uuid::new_v4().as_bytes());
        Self::new(&secret)
    }

    fn keyed(&self, article_id: ArticleId) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(format!("article-view:{article_id}").as_bytes());
        mac
    }
}

impl ViewMarkerCodec for HmacViewMarkerCodec {
    fn issue(&self, article_id: ArticleId) -> String {
        URL_SAFE_NO_PAD.encode(self.keyed(article_id).finalize().into_bytes())
    }

    fn verify(&self, article_id: ArticleId, marker: &str) -> bool {
        let Ok(tag) = URL_SAFE_NO_PAD.decode(marker.trim()) else {
            return false;
        };
        self.keyed(article_id).verify_slice(&tag).is_ok()
    }
}
