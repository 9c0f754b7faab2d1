/// Local auth handlers: register, login, email verification and the
/// password reset lifecycle.
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::local_auth::{self, ResendOutcome};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,

    #[validate(custom(function = "crate::validators::password_strength"))]
    pub password: String,

    pub confirm_password: String,

    #[validate(custom(function = "crate::validators::document_id_format"))]
    pub document_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct EmailOnlyRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub token: String,

    #[validate(custom(function = "crate::validators::password_strength"))]
    pub new_password: String,

    pub confirm_password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub access_token: String,
}

pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;

    local_auth::register(
        &state.db,
        &state.mailer,
        &payload.email,
        &payload.password,
        &payload.confirm_password,
        payload.document_id.as_deref(),
    )
    .await?;

    Ok(HttpResponse::Created().json(MessageResponse {
        message: "Registration started. Check your email.",
    }))
}

pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;

    let (_, access_token) = local_auth::login(
        &state.db,
        &state.config.jwt_secret,
        &payload.email,
        &payload.password,
    )
    .await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful",
        access_token,
    }))
}

pub async fn verify_email(
    state: web::Data<AppState>,
    payload: web::Json<VerifyEmailRequest>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;

    local_auth::verify_email(&state.db, &payload.email, &payload.token).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Email verified. You can now sign in.",
    }))
}

pub async fn resend_verification(
    state: web::Data<AppState>,
    payload: web::Json<EmailOnlyRequest>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;

    let message = match local_auth::resend_verification(&state.db, &state.mailer, &payload.email)
        .await?
    {
        ResendOutcome::Sent => "If the account exists, a new verification email has been sent.",
        ResendOutcome::AlreadyVerified => "This account is already verified.",
    };

    Ok(HttpResponse::Ok().json(MessageResponse { message }))
}

pub async fn forgot_password(
    state: web::Data<AppState>,
    payload: web::Json<EmailOnlyRequest>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;

    local_auth::forgot_password(&state.db, &state.mailer, &payload.email).await?;

    // Same shape whether or not the account exists.
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "If the account exists, reset instructions have been sent.",
    }))
}

pub async fn reset_password(
    state: web::Data<AppState>,
    payload: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;

    local_auth::reset_password(
        &state.db,
        &payload.email,
        &payload.token,
        &payload.new_password,
        &payload.confirm_password,
    )
    .await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Password updated. You can now sign in.",
    }))
}

pub async fn profile(
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let view = local_auth::profile(&state.db, user.id, &user.email).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "user": view })))
}
