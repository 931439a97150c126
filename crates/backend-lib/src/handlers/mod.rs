// ============================
// axelsub-backend-lib/src/handlers/mod.rs
// ============================
//! HTTP handlers and the request-side helpers they share: session cookie
//! plumbing and the authorization gate every mutating route calls first.

pub mod animes;
pub mod auth;
pub mod comments;
pub mod jikan;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::{header::COOKIE, HeaderMap, HeaderValue};

use crate::error::AppError;
use crate::storage::{Store, User};
use crate::AppState;

/// Name of the session cookie
pub const SESSION_COOKIE_NAME: &str = "axelsub_session";

/// Resolve the request to its authenticated identity.
///
/// This is the authorization gate: token from the cookie, session from
/// the store, identity from persistence. Every mutating handler calls it
/// before touching persisted state, and any miss is `Unauthenticated`.
pub(crate) async fn require_session<S: Store>(
    headers: &HeaderMap,
    state: &AppState<S>,
) -> Result<User, AppError> {
    let token = extract_session_token(headers).ok_or(AppError::Unauthenticated)?;
    let session = state
        .sessions
        .resolve(&token)
        .await
        .ok_or(AppError::Unauthenticated)?;
    state
        .storage
        .find_user(session.user_id)
        .await?
        .ok_or(AppError::Unauthenticated)
}

/// Pull the session token out of the cookie header, if present
pub(crate) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == SESSION_COOKIE_NAME {
            return Some(val.to_string());
        }
    }
    None
}

/// Build the `HttpOnly` session cookie
pub(crate) fn session_cookie(
    token: &str,
    ttl_secs: u64,
    secure: bool,
) -> Result<HeaderValue, AppError> {
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_secs}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).map_err(|e| AppError::Internal(format!("cookie header: {e}")))
}

/// Build the cookie that clears a session on logout
pub(crate) fn clear_session_cookie(secure: bool) -> HeaderValue {
    if secure {
        HeaderValue::from_static(
            "axelsub_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0; Secure",
        )
    } else {
        HeaderValue::from_static("axelsub_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
    }
}

/// Key identifying the client for login lockout purposes
pub(crate) fn client_key(headers: &HeaderMap) -> String {
    if let Some(ip) = headers.get("x-real-ip").and_then(|h| h.to_str().ok()) {
        return ip.to_string();
    }
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|h| h.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            return first.trim().to_string();
        }
    }
    "unknown".to_string()
}

/// JSON body extractor whose rejection is a field-less validation error,
/// so malformed bodies share the `{"message": ...}` shape of every other
/// 4xx instead of axum's plain-text default.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(ValidJson(value)),
            Err(rejection) => Err(AppError::Validation {
                message: rejection.body_text(),
                field: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_the_session_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; axelsub_session=tok123; lang=en"),
        );
        assert_eq!(extract_session_token(&headers), Some("tok123".to_string()));
    }

    #[test]
    fn missing_cookie_is_none() {
        let headers = HeaderMap::new();
        assert_eq!(extract_session_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(extract_session_token(&headers), None);
    }

    #[test]
    fn session_cookie_carries_the_flags() {
        let cookie = session_cookie("tok123", 3600, false).unwrap();
        let value = cookie.to_str().unwrap();
        assert!(value.contains("axelsub_session=tok123"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("Max-Age=3600"));
        assert!(!value.contains("Secure"));

        let secure = session_cookie("tok123", 3600, true).unwrap();
        assert!(secure.to_str().unwrap().contains("Secure"));
    }

    #[test]
    fn client_key_prefers_x_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("1.2.3.4"));
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("5.6.7.8, 9.9.9.9"),
        );
        assert_eq!(client_key(&headers), "1.2.3.4");

        headers.remove("x-real-ip");
        assert_eq!(client_key(&headers), "5.6.7.8");

        assert_eq!(client_key(&HeaderMap::new()), "unknown");
    }
}
