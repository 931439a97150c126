// ============================
// axelsub-backend-lib/src/router.rs
// ============================
//! HTTP router assembly.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{animes, auth, comments, jikan};
use crate::storage::Store;
use crate::AppState;

/// Create the API router
pub fn create_router<S: Store + Clone + Send + Sync + 'static>(
    state: Arc<AppState<S>>,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/register", post(auth::register::<S>))
        .route("/api/auth/login", post(auth::login::<S>))
        .route("/api/auth/logout", post(auth::logout::<S>))
        .route("/api/user", get(auth::me::<S>))
        .route(
            "/api/animes",
            get(animes::list::<S>).post(animes::create::<S>),
        )
        .route("/api/animes/{id}", get(animes::get::<S>))
        .route(
            "/api/animes/{anime_id}/comments",
            get(comments::list::<S>).post(comments::create::<S>),
        )
        .route("/api/jikan/search", get(jikan::search::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
