// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use std::{path::PathBuf, sync::Arc};

/// Directory of stored uploads and the URL prefix it is served under.
#[derive(Clone, Debug)]
pub struct StaticUploads {
    pub dir: PathBuf,
    pub route: String,
}

#[derive(Clone, Debug, Default)]
pub struct HttpSettings {
    pub allowed_origins: Vec<String>,
    pub uploads: Option<StaticUploads>,
    /// Upper bound for raw upload bodies, enforced before buffering.
    pub max_upload_bytes: usize,
    /// Adds `Secure` to view marker cookies.
    pub secure_cookies: bool,
    /// Throttles the credential endpoints per client IP.
    pub rate_limit_auth: bool,
}

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    pub settings: Arc<HttpSettings>,
}
