/// Google sign-in: the client completes the OAuth dance and posts the ID
/// token here; we verify it server-side and mint a session.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

use crate::error::ApiError;
use crate::handlers::auth::LoginResponse;
use crate::security;
use crate::services::oauth;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct GoogleLoginRequest {
    #[validate(length(min = 1))]
    pub id_token: String,
}

pub async fn google_login(
    state: web::Data<AppState>,
    payload: web::Json<GoogleLoginRequest>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;

    let verifier = state
        .google
        .as_ref()
        .ok_or_else(|| ApiError::Internal("Google login is not configured".to_string()))?;

    let profile = verifier.verify_id_token(&payload.id_token).await?;
    let user = oauth::resolve_profile(&state.db, &profile).await?;

    let access_token = security::issue_token(
        &state.config.jwt_secret,
        user.id,
        &user.email,
        security::session_ttl(),
    )?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful",
        access_token,
    }))
}
