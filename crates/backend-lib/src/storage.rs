// ============================
// axelsub-backend-lib/src/storage.rs
// ============================
//! Storage abstraction with an in-memory implementation.
//!
//! The service talks to persistence through the narrow [`Store`] trait;
//! [`MemoryStore`] is the concurrent-map implementation used by the
//! shipped binary and the tests. A relational backend implements the same
//! trait without touching any handler.

use async_trait::async_trait;
use axelsub_common::{Anime, Comment, Id, PublicUser, DEFAULT_QUALITY};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::fmt;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::AppError;

/// A registered account as stored.
///
/// `password` holds the derived credential secret, never the plaintext.
/// The struct is not serializable; [`PublicUser`] is the wire projection.
#[derive(Clone)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub email: String,
    /// Credential secret (`hex(hash).hex(salt)`)
    pub password: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        PublicUser {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            bio: user.bio.clone(),
            avatar_url: user.avatar_url.clone(),
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

/// Insert model for a user; `password` is the already-derived secret
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub is_admin: bool,
}

/// Insert model for an anime
#[derive(Debug, Clone)]
pub struct NewAnime {
    pub mal_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub genres: Vec<String>,
    pub video_url: String,
    pub quality: Option<String>,
    pub uploader_id: Id,
}

/// Insert model for a comment
#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub user_id: Id,
    pub anime_id: Id,
}

/// Trait for persistence backends
#[async_trait]
pub trait Store: Send + Sync {
    // Users
    async fn find_user(&self, id: Id) -> Result<Option<User>, AppError>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError>;

    // Animes
    async fn list_animes(&self) -> Result<Vec<Anime>, AppError>;
    async fn get_anime(&self, id: Id) -> Result<Option<Anime>, AppError>;
    async fn insert_anime(&self, anime: NewAnime) -> Result<Anime, AppError>;

    // Comments
    async fn list_comments(&self, anime_id: Id) -> Result<Vec<Comment>, AppError>;
    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, AppError>;
}

/// In-memory implementation of the [`Store`] trait
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    users: DashMap<Id, User>,
    animes: DashMap<Id, Anime>,
    comments: DashMap<Id, Comment>,
    next_user_id: AtomicI64,
    next_anime_id: AtomicI64,
    next_comment_id: AtomicI64,
    writes: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful inserts since construction. Tests use this to
    /// assert that rejected requests never reached persistence.
    pub fn write_count(&self) -> u64 {
        self.inner.writes.load(Ordering::SeqCst)
    }

    fn record_write(&self) {
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user(&self, id: Id) -> Result<Option<User>, AppError> {
        Ok(self.inner.users.get(&id).map(|u| u.clone()))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .inner
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.clone()))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .inner
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.clone()))
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        // uniqueness backstop; the authenticator checks first, in the
        // same order, so these normally never fire
        if self.find_user_by_email(&user.email).await?.is_some() {
            return Err(AppError::EmailTaken);
        }
        if self.find_user_by_username(&user.username).await?.is_some() {
            return Err(AppError::UsernameTaken);
        }

        let id = self.inner.next_user_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User {
            id,
            username: user.username,
            email: user.email,
            password: user.password,
            bio: user.bio,
            avatar_url: user.avatar_url,
            is_admin: user.is_admin,
            created_at: Utc::now(),
        };
        self.inner.users.insert(id, user.clone());
        self.record_write();
        Ok(user)
    }

    async fn list_animes(&self) -> Result<Vec<Anime>, AppError> {
        let mut animes: Vec<Anime> = self.inner.animes.iter().map(|a| a.clone()).collect();
        // newest first; id breaks ties between same-instant inserts
        animes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(animes)
    }

    async fn get_anime(&self, id: Id) -> Result<Option<Anime>, AppError> {
        Ok(self.inner.animes.get(&id).map(|a| a.clone()))
    }

    async fn insert_anime(&self, anime: NewAnime) -> Result<Anime, AppError> {
        let id = self.inner.next_anime_id.fetch_add(1, Ordering::SeqCst) + 1;
        let anime = Anime {
            id,
            mal_id: anime.mal_id,
            title: anime.title,
            description: anime.description,
            cover_image: anime.cover_image,
            genres: anime.genres,
            video_url: anime.video_url,
            quality: anime.quality.unwrap_or_else(|| DEFAULT_QUALITY.to_string()),
            uploader_id: anime.uploader_id,
            created_at: Utc::now(),
        };
        self.inner.animes.insert(id, anime.clone());
        self.record_write();
        Ok(anime)
    }

    async fn list_comments(&self, anime_id: Id) -> Result<Vec<Comment>, AppError> {
        let mut comments: Vec<Comment> = self
            .inner
            .comments
            .iter()
            .filter(|c| c.anime_id == anime_id)
            .map(|c| c.clone())
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(comments)
    }

    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, AppError> {
        let id = self.inner.next_comment_id.fetch_add(1, Ordering::SeqCst) + 1;
        let comment = Comment {
            id,
            content: comment.content,
            user_id: comment.user_id,
            anime_id: comment.anime_id,
            created_at: Utc::now(),
        };
        self.inner.comments.insert(id, comment.clone());
        self.record_write();
        Ok(comment)
    }
}
