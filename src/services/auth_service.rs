use sea_orm::{ConnectionTrait, DbErr, SqlErr, TransactionTrait};

use crate::errors::{AppError, FieldErrors, Result};
use crate::middleware::AuthUser;
use crate::models::dto::AuthPayload;
use crate::models::users;
use crate::repositories::UserRepository;
use crate::services::authenticator::Authenticator;
use crate::services::validation::{self, Payload};
use crate::utils::password;

const EMAIL_TAKEN: &str = "The email has already been taken.";

pub struct AuthService;

impl AuthService {
    /// Creates the account and opens its first session, both or neither.
    pub async fn register<C: ConnectionTrait + TransactionTrait>(
        db: &C,
        authenticator: &dyn Authenticator,
        payload: &Payload,
    ) -> Result<AuthPayload> {
        let (registration, mut errors) = validation::check_registration(payload);

        if let Some(registration) = &registration {
            if UserRepository::find_by_email(db, &registration.email).await?.is_some() {
                errors.add("email", EMAIL_TAKEN);
            }
        }
        errors.into_result()?;

        let registration = registration
            .ok_or_else(|| AppError::Internal("validated registration is incomplete".to_string()))?;

        let password = registration.password;
        let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
            .map_err(AppError::Internal)?;

        let txn = db.begin().await?;
        let user = UserRepository::insert(&txn, &registration.name, &registration.email, password_hash)
            .await
            .map_err(email_conflict)?;
        let token = authenticator.issue(&txn, user.id, "register").await?;
        txn.commit().await?;

        tracing::info!(user_id = user.id, "user registered");
        Ok(AuthPayload::bearer(user, token))
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login<C: ConnectionTrait + TransactionTrait>(
        db: &C,
        authenticator: &dyn Authenticator,
        payload: &Payload,
    ) -> Result<AuthPayload> {
        let credentials = validation::check_login(payload).map_err(AppError::Validation)?;

        let user = UserRepository::find_by_email(db, &credentials.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let stored = user.password.clone();
        let attempt = credentials.password;
        let is_valid = tokio::task::spawn_blocking(move || password::verify_password(&attempt, &stored))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?
            .map_err(|e| AppError::Internal(format!("Password verification error: {}", e)))?;

        if !is_valid {
            tracing::info!(user_id = user.id, "login rejected");
            return Err(AppError::InvalidCredentials);
        }

        let txn = db.begin().await?;
        let token = authenticator.issue(&txn, user.id, "login").await?;
        txn.commit().await?;

        Ok(AuthPayload::bearer(user, token))
    }

    pub async fn logout(authenticator: &dyn Authenticator, auth_user: &AuthUser) -> Result<()> {
        authenticator.revoke(auth_user).await
    }

    /// The session may outlive a deleted account; treat that as logged out.
    pub async fn current_user<C: ConnectionTrait>(db: &C, auth_user: &AuthUser) -> Result<users::Model> {
        UserRepository::find(db, auth_user.user_id)
            .await?
            .ok_or(AppError::Unauthenticated)
    }
}

// Two concurrent registrations can both pass the lookup; the unique index
// decides.
fn email_conflict(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            let mut errors = FieldErrors::new();
            errors.add("email", EMAIL_TAKEN);
            AppError::Validation(errors)
        }
        _ => AppError::Database(err),
    }
}
