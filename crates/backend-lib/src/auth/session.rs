// ============================
// axelsub-backend-lib/src/auth/session.rs
// ============================
//! Session storage and lifecycle management.
//!
//! A session moves `Created -> Active` on first use and ends by expiry
//! (wall-clock age past the configured lifetime) or explicit
//! invalidation on logout. Storage sits behind the [`SessionStore`]
//! trait so tests run against the in-memory map and production can point
//! the same manager at an external backend.

use async_trait::async_trait;
use axelsub_common::Id;
use dashmap::DashMap;
use metrics::{counter, gauge};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::debug;

use super::token::generate_session_token;
use crate::metrics as keys;

/// Default session lifetime
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 30); // 30 days

/// Interval between garbage-collection sweeps
const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60); // 1 hour

/// Lifecycle state of a live session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Issued but not yet presented on a request
    Created,
    /// Presented at least once
    Active,
}

/// A session record: one identity bound for a bounded lifetime
#[derive(Clone, Debug)]
pub struct Session {
    pub user_id: Id,
    pub state: SessionState,
    pub created_at: SystemTime,
    pub expires_at: SystemTime,
}

impl Session {
    pub fn new(user_id: Id, ttl: Duration) -> Self {
        let now = SystemTime::now();
        Session {
            user_id,
            state: SessionState::Created,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired_at(&self, now: SystemTime) -> bool {
        now >= self.expires_at
    }
}

/// Trait for session backends
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert or replace a session under a token
    async fn insert(&self, token: String, session: Session);

    /// Look up a session by token
    async fn get(&self, token: &str) -> Option<Session>;

    /// Remove a session, returning it if present
    async fn remove(&self, token: &str) -> Option<Session>;

    /// Drop every session expired at `now`, returning how many went
    async fn sweep(&self, now: SystemTime) -> usize;
}

/// In-memory implementation of the [`SessionStore`] trait
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: DashMap<String, Session>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, token: String, session: Session) {
        self.sessions.insert(token, session);
        gauge!(keys::SESSIONS_ACTIVE).set(self.sessions.len() as f64);
    }

    async fn get(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).map(|s| s.clone())
    }

    async fn remove(&self, token: &str) -> Option<Session> {
        let removed = self.sessions.remove(token).map(|(_, s)| s);
        gauge!(keys::SESSIONS_ACTIVE).set(self.sessions.len() as f64);
        removed
    }

    async fn sweep(&self, now: SystemTime) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired_at(now));
        let removed = before - self.sessions.len();
        if removed > 0 {
            counter!(keys::SESSION_EXPIRED).increment(removed as u64);
            gauge!(keys::SESSIONS_ACTIVE).set(self.sessions.len() as f64);
        }
        removed
    }
}

/// Session manager layering lifetime policy over a [`SessionStore`]
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    ttl: Duration,
}

impl SessionManager {
    /// Create a manager over a fresh in-memory store and spawn the
    /// periodic cleanup task
    pub fn new(ttl: Duration) -> Self {
        let manager = Self::with_store(Arc::new(MemorySessionStore::default()), ttl);

        let manager_clone = manager.clone();
        tokio::spawn(async move {
            manager_clone.sweep_task().await;
        });

        manager
    }

    /// Create a manager over an injected store. No cleanup task is
    /// spawned; the caller owns the sweep cadence.
    pub fn with_store(store: Arc<dyn SessionStore>, ttl: Duration) -> Self {
        SessionManager { store, ttl }
    }

    /// Issue a new session for an identity, returning the opaque token
    pub async fn create(&self, user_id: Id) -> String {
        let token = generate_session_token();
        let session = Session::new(user_id, self.ttl);
        self.store.insert(token.clone(), session).await;
        counter!(keys::SESSION_CREATED).increment(1);
        token
    }

    /// Resolve a token to its live session.
    ///
    /// Expired sessions are removed and rejected here; the hourly sweep
    /// only reclaims memory for tokens that are never presented again.
    pub async fn resolve(&self, token: &str) -> Option<Session> {
        let mut session = self.store.get(token).await?;

        if session.is_expired_at(SystemTime::now()) {
            self.store.remove(token).await;
            counter!(keys::SESSION_EXPIRED).increment(1);
            debug!("rejected expired session");
            return None;
        }

        if session.state == SessionState::Created {
            session.state = SessionState::Active;
            self.store.insert(token.to_string(), session.clone()).await;
        }

        Some(session)
    }

    /// Invalidate a session on logout
    pub async fn invalidate(&self, token: &str) -> bool {
        let removed = self.store.remove(token).await.is_some();
        if removed {
            counter!(keys::SESSION_INVALIDATED).increment(1);
        }
        removed
    }

    /// Periodic garbage collection of expired sessions
    async fn sweep_task(&self) {
        loop {
            tokio::time::sleep(SWEEP_INTERVAL).await;
            let removed = self.store.sweep(SystemTime::now()).await;
            if removed > 0 {
                debug!(removed, "swept expired sessions");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_resolve_invalidate() {
        let manager = SessionManager::new(SESSION_TTL);

        let token = manager.create(7).await;
        let session = manager.resolve(&token).await.unwrap();
        assert_eq!(session.user_id, 7);

        assert!(manager.invalidate(&token).await);
        assert!(manager.resolve(&token).await.is_none());
        // double logout is a no-op
        assert!(!manager.invalidate(&token).await);
    }

    #[tokio::test]
    async fn unknown_token_does_not_resolve() {
        let manager = SessionManager::new(SESSION_TTL);
        assert!(manager.resolve("not-a-token").await.is_none());
    }

    #[tokio::test]
    async fn first_use_marks_the_session_active() {
        let store = Arc::new(MemorySessionStore::default());
        let manager = SessionManager::with_store(store.clone(), SESSION_TTL);

        let token = manager.create(1).await;
        assert_eq!(
            store.get(&token).await.unwrap().state,
            SessionState::Created
        );

        manager.resolve(&token).await.unwrap();
        assert_eq!(store.get(&token).await.unwrap().state, SessionState::Active);
    }

    #[tokio::test]
    async fn expired_sessions_are_rejected_and_removed() {
        let store = Arc::new(MemorySessionStore::default());
        let manager = SessionManager::with_store(store.clone(), SESSION_TTL);

        let day = Duration::from_secs(60 * 60 * 24);
        let now = SystemTime::now();

        // created 29 days ago: still inside the 30-day lifetime
        let fresh_start = now - 29 * day;
        store
            .insert(
                "t29".to_string(),
                Session {
                    user_id: 1,
                    state: SessionState::Created,
                    created_at: fresh_start,
                    expires_at: fresh_start + SESSION_TTL,
                },
            )
            .await;
        assert!(manager.resolve("t29").await.is_some());

        // created 31 days ago: past the lifetime, rejected and dropped
        let stale_start = now - 31 * day;
        store
            .insert(
                "t31".to_string(),
                Session {
                    user_id: 1,
                    state: SessionState::Active,
                    created_at: stale_start,
                    expires_at: stale_start + SESSION_TTL,
                },
            )
            .await;
        assert!(manager.resolve("t31").await.is_none());
        assert!(store.get("t31").await.is_none());
    }

    #[tokio::test]
    async fn sweep_reclaims_only_expired_sessions() {
        let store = Arc::new(MemorySessionStore::default());
        let manager = SessionManager::with_store(store.clone(), SESSION_TTL);

        let live = manager.create(1).await;
        let past = SystemTime::now() - Duration::from_secs(10);
        store
            .insert(
                "stale".to_string(),
                Session {
                    user_id: 2,
                    state: SessionState::Active,
                    created_at: past - SESSION_TTL,
                    expires_at: past,
                },
            )
            .await;

        let removed = store.sweep(SystemTime::now()).await;
        assert_eq!(removed, 1);
        assert!(store.get(&live).await.is_some());
        assert!(store.get("stale").await.is_none());
    }
}
