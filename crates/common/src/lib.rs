// ================
// common/src/lib.rs
// ================
//! Shared API contract types
//! used for communication between the AxelSub web client and server.
//! This module defines the JSON request and response shapes and supporting
//! entity records. All wire names are camelCase to match the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entity id type used across users, animes and comments
pub type Id = i64;

/// Default stream quality applied when a share omits it
pub const DEFAULT_QUALITY: &str = "720p";

/// Public projection of a registered user.
///
/// This is the only identity shape that crosses the wire. The stored
/// credential secret has no field here, so a response can never carry it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    /// User id
    pub id: Id,
    /// Unique display name
    pub username: String,
    /// Unique email address
    pub email: String,
    /// Optional profile text
    pub bio: Option<String>,
    /// Optional avatar image URL
    pub avatar_url: Option<String>,
    /// Administrative flag
    pub is_admin: bool,
    /// Account creation time
    pub created_at: DateTime<Utc>,
}

/// A shared anime record
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Anime {
    /// Record id
    pub id: Id,
    /// MyAnimeList id the record was auto-filled from
    pub mal_id: i64,
    /// Title
    pub title: String,
    /// Synopsis
    pub description: Option<String>,
    /// Cover image URL
    pub cover_image: Option<String>,
    /// Genre tags
    #[serde(default)]
    pub genres: Vec<String>,
    /// The stream source
    pub video_url: String,
    /// Stream quality label
    pub quality: String,
    /// Id of the uploading user
    pub uploader_id: Id,
    /// Share time
    pub created_at: DateTime<Utc>,
}

/// A comment on an anime
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Record id
    pub id: Id,
    /// Comment body
    pub content: String,
    /// Id of the authoring user
    pub user_id: Id,
    /// Id of the commented anime
    pub anime_id: Id,
    /// Post time
    pub created_at: DateTime<Utc>,
}

/// Anime list/detail response item: the record plus its uploader
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnimeWithUploader {
    #[serde(flatten)]
    pub anime: Anime,
    /// Uploader projection; absent if the account was deleted
    pub uploader: Option<PublicUser>,
}

/// Comment list response item: the record plus its author
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CommentWithUser {
    #[serde(flatten)]
    pub comment: Comment,
    /// Author projection
    pub user: PublicUser,
}

/// Body of `POST /api/auth/register`.
///
/// There is deliberately no `is_admin` field: the flag can only be set by
/// seed data, never by a client.
#[derive(Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("bio", &self.bio)
            .field("avatar_url", &self.avatar_url)
            .finish()
    }
}

/// Body of `POST /api/auth/login`
#[derive(Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /api/animes`.
///
/// The uploader is taken from the session, so there is no uploader field
/// for a client to supply.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnimeRequest {
    pub mal_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub video_url: String,
    pub quality: Option<String>,
}

/// Body of `POST /api/animes/{animeId}/comments`
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_user() -> PublicUser {
        PublicUser {
            id: 1,
            username: "axel_admin".into(),
            email: "admin@axelsub.com".into(),
            bio: None,
            avatar_url: Some("https://example.com/a.png".into()),
            is_admin: true,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn public_user_uses_camel_case_wire_names() {
        let value = serde_json::to_value(sample_user()).unwrap();
        assert!(value.get("avatarUrl").is_some());
        assert!(value.get("isAdmin").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("avatar_url").is_none());
    }

    #[test]
    fn anime_with_uploader_flattens_the_record() {
        let item = AnimeWithUploader {
            anime: Anime {
                id: 7,
                mal_id: 1,
                title: "Cowboy Bebop".into(),
                description: None,
                cover_image: None,
                genres: vec!["Action".into(), "Sci-Fi".into()],
                video_url: "https://example.com/v.mp4".into(),
                quality: DEFAULT_QUALITY.into(),
                uploader_id: 1,
                created_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            },
            uploader: Some(sample_user()),
        };
        let value = serde_json::to_value(item).unwrap();
        // flattened: title at the top level, uploader nested
        assert_eq!(value["title"], "Cowboy Bebop");
        assert_eq!(value["malId"], 1);
        assert_eq!(value["uploader"]["username"], "axel_admin");
    }

    #[test]
    fn login_request_debug_redacts_the_password() {
        let req = LoginRequest {
            email: "a@b.com".into(),
            password: "hunter2222".into(),
        };
        let rendered = format!("{req:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("hunter2222"));
    }
}
