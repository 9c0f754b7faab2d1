/// Local email/password credential flows: registration, login, email
/// verification, and the password reset lifecycle.
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::user_repo;
use crate::error::{ApiError, Result};
use crate::models::{User, UserStatus};
use crate::security::{self, hash_secret, verify_secret};
use crate::services::mailer::Mailer;
use crate::services::tokens::{self, TokenPurpose};
use crate::validators::normalize_email;

/// Create a `pending_verification` account and send the verification link.
///
/// The existence pre-check is best effort; the unique index on
/// lower(email) is what actually prevents concurrent duplicates.
pub async fn register(
    pool: &PgPool,
    mailer: &Mailer,
    email: &str,
    password: &str,
    confirm_password: &str,
    document_id: Option<&str>,
) -> Result<User> {
    if password != confirm_password {
        return Err(ApiError::PasswordMismatch);
    }

    let email = normalize_email(email);

    if user_repo::find_by_email(pool, &email).await?.is_some() {
        return Err(ApiError::EmailTaken);
    }

    let password_hash = hash_secret(password)?;
    let user = user_repo::create_local_user(pool, &email, &password_hash, document_id).await?;

    let (token, _) = tokens::issue(pool, user.id, TokenPurpose::EmailVerification).await?;
    mailer.send_verification_email(&email, &token).await?;

    tracing::info!(user_id = %user.id, "local registration started");
    Ok(user)
}

/// Password login. Unknown email, missing password hash (OAuth-only
/// account) and wrong password all collapse into `InvalidCredentials`;
/// only an unverified account with a correct password is distinguishable.
pub async fn login(
    pool: &PgPool,
    jwt_secret: &str,
    email: &str,
    password: &str,
) -> Result<(User, String)> {
    let email = normalize_email(email);

    let user = user_repo::find_by_email(pool, &email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let password_hash = user
        .password_hash
        .as_deref()
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_secret(password_hash, password)? {
        return Err(ApiError::InvalidCredentials);
    }

    if user.status != UserStatus::Active || user.email_verified_at.is_none() {
        return Err(ApiError::EmailNotVerified);
    }

    let token = security::issue_token(jwt_secret, user.id, &user.email, security::session_ttl())?;

    tracing::info!(user_id = %user.id, "user logged in");
    Ok((user, token))
}

/// Redeem a verification token and activate the account.
pub async fn verify_email(pool: &PgPool, email: &str, token: &str) -> Result<()> {
    let email = normalize_email(email);

    let user = user_repo::find_by_email(pool, &email)
        .await?
        .ok_or(ApiError::InvalidToken)?;

    tokens::redeem(pool, user.id, TokenPurpose::EmailVerification, token).await?;
    user_repo::mark_email_verified(pool, user.id).await?;

    tracing::info!(user_id = %user.id, "email verified");
    Ok(())
}

pub enum ResendOutcome {
    /// Sent, or the account does not exist. Indistinguishable on purpose.
    Sent,
    AlreadyVerified,
}

/// Re-issue the verification token. The response shape never reveals
/// whether the account exists.
pub async fn resend_verification(
    pool: &PgPool,
    mailer: &Mailer,
    email: &str,
) -> Result<ResendOutcome> {
    let email = normalize_email(email);

    let user = match user_repo::find_by_email(pool, &email).await? {
        Some(user) => user,
        None => return Ok(ResendOutcome::Sent),
    };

    if user.status == UserStatus::Active && user.email_verified_at.is_some() {
        return Ok(ResendOutcome::AlreadyVerified);
    }

    let (token, _) = tokens::issue(pool, user.id, TokenPurpose::EmailVerification).await?;
    mailer.send_verification_email(&email, &token).await?;

    Ok(ResendOutcome::Sent)
}

/// Issue a reset token if the account exists; the caller always answers
/// with the same success-shaped message either way.
pub async fn forgot_password(pool: &PgPool, mailer: &Mailer, email: &str) -> Result<()> {
    let email = normalize_email(email);

    let user = match user_repo::find_by_email(pool, &email).await? {
        Some(user) => user,
        None => return Ok(()),
    };

    let (token, _) = tokens::issue(pool, user.id, TokenPurpose::PasswordReset).await?;
    mailer.send_password_reset_email(&email, &token).await?;

    Ok(())
}

pub async fn reset_password(
    pool: &PgPool,
    email: &str,
    token: &str,
    new_password: &str,
    confirm_password: &str,
) -> Result<()> {
    if new_password != confirm_password {
        return Err(ApiError::PasswordMismatch);
    }

    let email = normalize_email(email);

    let user = user_repo::find_by_email(pool, &email)
        .await?
        .ok_or(ApiError::InvalidToken)?;

    tokens::redeem(pool, user.id, TokenPurpose::PasswordReset, token).await?;

    let password_hash = hash_secret(new_password)?;
    user_repo::update_password(pool, user.id, &password_hash).await?;

    tracing::info!(user_id = %user.id, "password reset completed");
    Ok(())
}

/// Profile for the session subject. A missing row falls back to the token
/// claims so a freshly-created OAuth session still resolves.
pub async fn profile(pool: &PgPool, user_id: Uuid, email: &str) -> Result<ProfileView> {
    match user_repo::find_by_id(pool, user_id).await? {
        Some(user) => Ok(ProfileView {
            id: user.id,
            name: user.name.unwrap_or_else(|| user.email.clone()),
            email: user.email,
            picture: user.picture,
        }),
        None => Ok(ProfileView {
            id: user_id,
            email: email.to_string(),
            name: email.to_string(),
            picture: None,
        }),
    }
}

#[derive(Debug, serde::Serialize)]
pub struct ProfileView {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}
