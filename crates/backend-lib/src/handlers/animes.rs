// ============================
// axelsub-backend-lib/src/handlers/animes.rs
// ============================
//! Anime listing, detail and creation.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use metrics::counter;
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

use axelsub_common::{AnimeWithUploader, CreateAnimeRequest, Id, PublicUser};

use super::{require_session, ValidJson};
use crate::error::AppError;
use crate::metrics as keys;
use crate::storage::{NewAnime, Store};
use crate::validation;
use crate::AppState;

/// Query parameters of `GET /api/animes`
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub genre: Option<String>,
}

/// `GET /api/animes`
pub async fn list<S>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<AnimeWithUploader>>, AppError>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let mut animes = state.storage.list_animes().await?;

    if let Some(search) = query.search.filter(|s| !s.is_empty()) {
        let needle = search.to_lowercase();
        animes.retain(|a| a.title.to_lowercase().contains(&needle));
    }
    if let Some(genre) = query.genre.filter(|g| !g.is_empty()) {
        animes.retain(|a| a.genres.iter().any(|g| g == &genre));
    }

    let mut items = Vec::with_capacity(animes.len());
    for anime in animes {
        let uploader = state
            .storage
            .find_user(anime.uploader_id)
            .await?
            .map(|u| PublicUser::from(&u));
        items.push(AnimeWithUploader { anime, uploader });
    }
    Ok(Json(items))
}

/// `GET /api/animes/{id}`
pub async fn get<S>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<Id>,
) -> Result<Json<AnimeWithUploader>, AppError>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let anime = state
        .storage
        .get_anime(id)
        .await?
        .ok_or(AppError::NotFound("Anime"))?;
    let uploader = state
        .storage
        .find_user(anime.uploader_id)
        .await?
        .map(|u| PublicUser::from(&u));
    Ok(Json(AnimeWithUploader { anime, uploader }))
}

/// `POST /api/animes`
///
/// The uploader is always the session identity; the payload has no say.
#[instrument(skip_all)]
pub async fn create<S>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    ValidJson(req): ValidJson<CreateAnimeRequest>,
) -> Result<impl IntoResponse, AppError>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let user = require_session(&headers, &state).await?;
    validation::validate_create_anime(&req)?;

    let anime = state
        .storage
        .insert_anime(NewAnime {
            mal_id: req.mal_id,
            title: req.title,
            description: req.description,
            cover_image: req.cover_image,
            genres: req.genres,
            video_url: req.video_url,
            quality: req.quality,
            uploader_id: user.id,
        })
        .await?;

    counter!(keys::ANIME_CREATED).increment(1);
    Ok((StatusCode::CREATED, Json(anime)))
}
