use async_trait::async_trait;
use axelsub_common::RegisterRequest;
use metrics::counter;
use tracing::debug;

use super::password;
use super::Authenticator;
use crate::error::AppError;
use crate::metrics as keys;
use crate::storage::{NewUser, Store, User};

/// Password-based [`Authenticator`] over a storage backend
pub struct DefaultAuth<S> {
    storage: S,
}

impl<S> DefaultAuth<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S: Store> Authenticator for DefaultAuth<S> {
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let Some(user) = self.storage.find_user_by_email(email).await? else {
            // burn a derivation so this path costs the same as a mismatch
            password::dummy_derivation(password);
            debug!(email, "login rejected: unknown email");
            return Err(AppError::InvalidCredentials);
        };

        if !password::verify_secret(password, &user.password)? {
            debug!(user_id = user.id, "login rejected: password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn register(&self, mut registration: RegisterRequest) -> Result<User, AppError> {
        if self
            .storage
            .find_user_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(AppError::EmailTaken);
        }

        if self
            .storage
            .find_user_by_username(&registration.username)
            .await?
            .is_some()
        {
            return Err(AppError::UsernameTaken);
        }

        let secret = password::derive_secret_scrub(&mut registration.password)?;
        let user = self
            .storage
            .insert_user(NewUser {
                username: registration.username,
                email: registration.email,
                password: secret,
                bio: registration.bio,
                avatar_url: registration.avatar_url,
                is_admin: false,
            })
            .await?;

        counter!(keys::USER_REGISTERED).increment(1);
        debug!(user_id = user.id, "registered new user");
        Ok(user)
    }
}
