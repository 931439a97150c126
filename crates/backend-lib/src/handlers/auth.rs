// ============================
// axelsub-backend-lib/src/handlers/auth.rs
// ============================
//! Registration, login, logout and the current-user endpoint.

use axum::extract::State;
use axum::http::{header::SET_COOKIE, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use metrics::counter;
use std::sync::Arc;
use tracing::instrument;

use axelsub_common::{LoginRequest, PublicUser, RegisterRequest};

use super::{
    clear_session_cookie, client_key, extract_session_token, require_session, session_cookie,
    ValidJson,
};
use crate::error::AppError;
use crate::metrics as keys;
use crate::storage::Store;
use crate::validation;
use crate::AppState;

/// `POST /api/auth/register`
///
/// Registration implies login: a session cookie rides along with the 201.
#[instrument(skip_all)]
pub async fn register<S>(
    State(state): State<Arc<AppState<S>>>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError>
where
    S: Store + Clone + Send + Sync + 'static,
{
    validation::validate_registration(&req)?;

    let user = state.auth.register(req).await?;
    let token = state.sessions.create(user.id).await;
    let cookie = session_cookie(
        &token,
        state.settings.session_ttl_secs,
        state.settings.cookie_secure,
    )?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    Ok((StatusCode::CREATED, headers, Json(PublicUser::from(&user))))
}

/// `POST /api/auth/login`
#[instrument(skip_all)]
pub async fn login<S>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError>
where
    S: Store + Clone + Send + Sync + 'static,
{
    validation::validate_login(&req)?;

    let client = client_key(&headers);
    if !state.login_limiter.check(&client) {
        counter!(keys::LOGIN_LOCKOUT).increment(1);
        return Err(AppError::LockedOut);
    }

    match state.auth.authenticate(&req.email, &req.password).await {
        Ok(user) => {
            state.login_limiter.record_success(&client);
            counter!(keys::LOGIN_SUCCESS).increment(1);

            let token = state.sessions.create(user.id).await;
            let cookie = session_cookie(
                &token,
                state.settings.session_ttl_secs,
                state.settings.cookie_secure,
            )?;

            let mut out = HeaderMap::new();
            out.insert(SET_COOKIE, cookie);
            Ok((StatusCode::OK, out, Json(PublicUser::from(&user))))
        }
        Err(err @ AppError::InvalidCredentials) => {
            state.login_limiter.record_failure(&client);
            counter!(keys::LOGIN_FAILURE).increment(1);
            Err(err)
        }
        Err(err) => Err(err),
    }
}

/// `POST /api/auth/logout`
///
/// Clears the cookie whether or not a live session was attached.
pub async fn logout<S>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError>
where
    S: Store + Clone + Send + Sync + 'static,
{
    if let Some(token) = extract_session_token(&headers) {
        state.sessions.invalidate(&token).await;
    }

    let mut out = HeaderMap::new();
    out.insert(
        SET_COOKIE,
        clear_session_cookie(state.settings.cookie_secure),
    );
    Ok((StatusCode::OK, out))
}

/// `GET /api/user`
pub async fn me<S>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Result<Json<PublicUser>, AppError>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let user = require_session(&headers, &state).await?;
    Ok(Json(PublicUser::from(&user)))
}
