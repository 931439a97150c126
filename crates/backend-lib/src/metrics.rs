// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const SESSION_CREATED: &str = "session.created";
pub const SESSION_EXPIRED: &str = "session.expired";
pub const SESSION_INVALIDATED: &str = "session.invalidated";
pub const SESSIONS_ACTIVE: &str = "sessions.active";
pub const LOGIN_SUCCESS: &str = "auth.login.success";
pub const LOGIN_FAILURE: &str = "auth.login.failure";
pub const LOGIN_LOCKOUT: &str = "auth.login.lockout";
pub const USER_REGISTERED: &str = "auth.registered";
pub const ANIME_CREATED: &str = "anime.created";
pub const COMMENT_CREATED: &str = "comment.created";
