// ============================
// axelsub-backend-lib/src/handlers/comments.rs
// ============================
//! Per-anime comment listing and creation.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use metrics::counter;
use std::sync::Arc;
use tracing::instrument;

use axelsub_common::{CommentWithUser, CreateCommentRequest, Id, PublicUser};

use super::{require_session, ValidJson};
use crate::error::AppError;
use crate::metrics as keys;
use crate::storage::{NewComment, Store};
use crate::validation;
use crate::AppState;

/// `GET /api/animes/{anime_id}/comments`
pub async fn list<S>(
    State(state): State<Arc<AppState<S>>>,
    Path(anime_id): Path<Id>,
) -> Result<Json<Vec<CommentWithUser>>, AppError>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let comments = state.storage.list_comments(anime_id).await?;

    let mut items = Vec::with_capacity(comments.len());
    for comment in comments {
        // comments whose author no longer exists are dropped, like an
        // inner join would
        if let Some(user) = state.storage.find_user(comment.user_id).await? {
            items.push(CommentWithUser {
                comment,
                user: PublicUser::from(&user),
            });
        }
    }
    Ok(Json(items))
}

/// `POST /api/animes/{anime_id}/comments`
#[instrument(skip_all)]
pub async fn create<S>(
    State(state): State<Arc<AppState<S>>>,
    Path(anime_id): Path<Id>,
    headers: HeaderMap,
    ValidJson(req): ValidJson<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let user = require_session(&headers, &state).await?;
    validation::validate_create_comment(&req)?;

    if state.storage.get_anime(anime_id).await?.is_none() {
        return Err(AppError::NotFound("Anime"));
    }

    let comment = state
        .storage
        .insert_comment(NewComment {
            content: req.content,
            user_id: user.id,
            anime_id,
        })
        .await?;

    counter!(keys::COMMENT_CREATED).increment(1);
    Ok((StatusCode::CREATED, Json(comment)))
}
