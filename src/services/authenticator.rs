use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;

use sea_orm::{DatabaseConnection, DatabaseTransaction};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::middleware::AuthUser;
use crate::repositories::SessionRepository;
use crate::utils::jwt::JwtKeys;

/// Bearer-token capability used by the auth extractor and the auth routes.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Maps a bearer token to the identity it was issued for, or
    /// `AppError::Unauthenticated`.
    async fn resolve(&self, token: &str) -> Result<AuthUser>;

    /// Opens a session for `user_id` on `txn` and returns its bearer token.
    /// The session only exists once the caller commits.
    async fn issue(&self, txn: &DatabaseTransaction, user_id: i32, name: &str) -> Result<String>;

    /// Ends the session behind `user`; its token stops resolving.
    async fn revoke(&self, user: &AuthUser) -> Result<()>;
}

/// JWTs naming a row in `personal_access_tokens`.
pub struct SessionAuthenticator {
    db: Arc<DatabaseConnection>,
    keys: JwtKeys,
    ttl: Duration,
}

impl SessionAuthenticator {
    pub fn new(db: Arc<DatabaseConnection>, keys: JwtKeys, ttl: Duration) -> Self {
        Self { db, keys, ttl }
    }
}

#[async_trait]
impl Authenticator for SessionAuthenticator {
    async fn resolve(&self, token: &str) -> Result<AuthUser> {
        let claims = self.keys.verify_token(token).map_err(|e| {
            tracing::debug!(error = %e, "rejected bearer token");
            AppError::Unauthenticated
        })?;

        let session = SessionRepository::find_by_token_id(self.db.as_ref(), &claims.sid)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        let now = Utc::now();
        if session.user_id != claims.sub || !session.is_live_at(now) {
            tracing::debug!(session_id = %session.token_id, "session expired or mismatched");
            return Err(AppError::Unauthenticated);
        }

        SessionRepository::touch(self.db.as_ref(), session.id, now).await?;

        Ok(AuthUser {
            user_id: session.user_id,
            session_id: session.token_id,
        })
    }

    async fn issue(&self, txn: &DatabaseTransaction, user_id: i32, name: &str) -> Result<String> {
        let token_id = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + self.ttl;

        SessionRepository::create(txn, user_id, &token_id, name, expires_at).await?;

        self.keys
            .generate_token(user_id, &token_id, expires_at)
            .map_err(AppError::Internal)
    }

    async fn revoke(&self, user: &AuthUser) -> Result<()> {
        let removed = SessionRepository::delete_by_token_id(self.db.as_ref(), &user.session_id).await?;
        tracing::info!(user_id = user.user_id, removed, "session revoked");
        Ok(())
    }
}
