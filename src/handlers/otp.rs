use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

use crate::error::ApiError;
use crate::handlers::auth::{LoginResponse, MessageResponse};
use crate::services::otp;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RequestOtpRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(email)]
    pub email: String,

    #[validate(custom(function = "crate::validators::otp_code_format"))]
    pub code: String,
}

pub async fn request_otp(
    state: web::Data<AppState>,
    payload: web::Json<RequestOtpRequest>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;

    otp::request_otp(&state.db, &state.mailer, &payload.email).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "OTP sent to the registered email.",
    }))
}

pub async fn verify_otp(
    state: web::Data<AppState>,
    payload: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;

    let access_token = otp::verify_otp(
        &state.db,
        &state.config.jwt_secret,
        &payload.email,
        &payload.code,
    )
    .await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "OTP verified",
        access_token,
    }))
}
