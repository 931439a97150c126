use async_trait::async_trait;
use axelsub_common::RegisterRequest;

use crate::error::AppError;
use crate::storage::User;

/// Credential validation and account creation.
///
/// Both operations return the stored identity; handlers project it to
/// the public shape and establish the session themselves.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Validate an email/password pair.
    ///
    /// Fails with `InvalidCredentials` for unknown email and wrong
    /// password alike; the response never says which.
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError>;

    /// Create a new identity.
    ///
    /// Email uniqueness is checked before username uniqueness and the
    /// first violated constraint is the one reported.
    async fn register(&self, registration: RegisterRequest) -> Result<User, AppError>;
}
