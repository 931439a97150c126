// ============================
// axelsub-backend-lib/src/lib.rs
// ============================
//! Core backend functionality for the AxelSub sharing server.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod seed;
pub mod storage;
pub mod validation;

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{Authenticator, DefaultAuth, LoginRateLimiter, SessionManager};
use crate::config::Settings;
use crate::storage::Store;

/// Interval between login-lockout cleanup passes
const LIMITER_CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState<S> {
    /// Authentication service
    pub auth: Arc<dyn Authenticator>,
    /// Session manager
    pub sessions: Arc<SessionManager>,
    /// Settings
    pub settings: Arc<Settings>,
    /// Storage backend
    pub storage: S,
    /// Login lockout tracking
    pub login_limiter: Arc<LoginRateLimiter>,
    /// Upstream HTTP client for the metadata proxy
    pub http: reqwest::Client,
}

impl<S: Store + Clone + Send + Sync + 'static> AppState<S> {
    /// Create a new application state.
    ///
    /// Must run inside the tokio runtime: the session manager and the
    /// lockout cleaner spawn their background tasks here.
    pub fn new(storage: S, settings: Settings) -> Self {
        let sessions = Arc::new(SessionManager::new(settings.session_ttl()));
        let auth: Arc<dyn Authenticator> = Arc::new(DefaultAuth::new(storage.clone()));
        let login_limiter = Arc::new(LoginRateLimiter::new());

        let limiter = login_limiter.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(LIMITER_CLEANUP_INTERVAL).await;
                limiter.cleanup();
            }
        });

        Self {
            auth,
            sessions,
            settings: Arc::new(settings),
            storage,
            login_limiter,
            http: reqwest::Client::new(),
        }
    }
}
