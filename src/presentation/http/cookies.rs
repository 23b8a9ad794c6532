// src/presentation/http/cookies.rs
use crate::application::commands::articles::IssuedViewMarker;
use axum::http::{HeaderMap, HeaderValue};
use chrono::{DateTime, Duration, Utc};
use headers::{Cookie, HeaderMapExt};
use std::time::SystemTime;

pub fn view_marker_name(article_id: i64) -> String {
    format!("article_viewed_{article_id}")
}

/// Marker the client presented for `article_id`, if any.
pub fn read_view_marker(headers: &HeaderMap, article_id: i64) -> Option<String> {
    let cookie = headers.typed_get::<Cookie>()?;
    cookie
        .get(&view_marker_name(article_id))
        .map(str::to_string)
}

/// `Set-Cookie` value for a freshly issued marker.
pub fn view_marker_cookie(
    article_id: i64,
    marker: &IssuedViewMarker,
    now: DateTime<Utc>,
    secure: bool,
) -> Option<HeaderValue> {
    let expires = SystemTime::from(now + Duration::seconds(marker.ttl_secs));
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; Expires={}; HttpOnly; SameSite=Lax",
        view_marker_name(article_id),
        marker.value,
        marker.ttl_secs,
        httpdate::fmt_http_date(expires),
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    #[test]
    fn reads_only_the_matching_marker() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; article_viewed_12=abc; article_viewed_3=zzz"),
        );
        assert_eq!(read_view_marker(&headers, 12).as_deref(), Some("abc"));
        assert_eq!(read_view_marker(&headers, 4), None);
        assert_eq!(read_view_marker(&HeaderMap::new(), 12), None);
    }

    #[test]
    fn cookie_carries_one_year_expiry() {
        let now = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let marker = IssuedViewMarker {
            value: "tag".into(),
            ttl_secs: 31_536_000,
        };
        let value = view_marker_cookie(9, &marker, now, true).unwrap();
        let value = value.to_str().unwrap();

        assert!(value.starts_with("article_viewed_9=tag; Path=/; Max-Age=31536000;"));
        assert!(value.contains("Expires=Tue, 31 Dec 2024 00:00:00 GMT"));
        assert!(value.ends_with("HttpOnly; SameSite=Lax; Secure"));
    }
}
