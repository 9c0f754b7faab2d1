/// One-time email code login: request a 6-digit code, verify it, get a
/// session token.
use sqlx::PgPool;

use crate::db::user_repo;
use crate::error::{ApiError, Result};
use crate::security;
use crate::services::mailer::Mailer;
use crate::services::tokens::{self, TokenPurpose};
use crate::validators::normalize_email;

/// Issue and deliver a fresh OTP. Requires an existing account; OTP login
/// never provisions users.
pub async fn request_otp(pool: &PgPool, mailer: &Mailer, email: &str) -> Result<()> {
    let email = normalize_email(email);

    let user = user_repo::find_by_email(pool, &email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let (code, _) = tokens::issue(pool, user.id, TokenPurpose::OtpLogin).await?;
    mailer.send_otp_email(&email, &code).await?;

    tracing::info!(user_id = %user.id, "otp issued");
    Ok(())
}

/// Redeem the code and mint a session credential.
pub async fn verify_otp(pool: &PgPool, jwt_secret: &str, email: &str, code: &str) -> Result<String> {
    let email = normalize_email(email);

    let user = user_repo::find_by_email(pool, &email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    tokens::redeem(pool, user.id, TokenPurpose::OtpLogin, code).await?;

    let token = security::issue_token(jwt_secret, user.id, &user.email, security::session_ttl())?;

    tracing::info!(user_id = %user.id, "otp login");
    Ok(token)
}
