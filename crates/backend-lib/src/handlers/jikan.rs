// ============================
// axelsub-backend-lib/src/handlers/jikan.rs
// ============================
//! Read-only proxy to the Jikan metadata API, used by the client for
//! auto-fill suggestions when sharing.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::AppError;
use crate::storage::Store;
use crate::AppState;

/// Query parameters of `GET /api/jikan/search`
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// `GET /api/jikan/search`
///
/// Forwards the upstream JSON untouched; the client understands the
/// Jikan response shape directly.
pub async fn search<S>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<serde_json::Value>, AppError>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let url = format!("{}/anime", state.settings.jikan_base_url);
    let body: serde_json::Value = state
        .http
        .get(&url)
        .query(&[("q", query.q.as_str()), ("sfw", "true")])
        .send()
        .await?
        .json()
        .await?;

    Ok(Json(body))
}
