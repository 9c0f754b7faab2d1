/// Bearer-token authentication as an actix extractor: handlers that take
/// an `AuthUser` only run for requests carrying a valid session token.
use actix_web::{
    dev::Payload, error::ErrorUnauthorized, web, Error, FromRequest, HttpRequest,
};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::security;
use crate::AppState;

/// Identity asserted by a verified session credential. Only the subject
/// id and email are trusted from the token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

impl FromRequest for AuthUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<AuthUser, Error> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ErrorUnauthorized("Application state missing"))?;

    let header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ErrorUnauthorized("Missing Authorization header"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ErrorUnauthorized("Invalid Authorization scheme, expected Bearer"))?;

    let claims = security::verify_token(&state.config.jwt_secret, token).map_err(|e| {
        tracing::debug!("session token rejected: {e}");
        ErrorUnauthorized("Invalid or expired token")
    })?;

    let id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ErrorUnauthorized("Invalid subject in token"))?;

    Ok(AuthUser {
        id,
        email: claims.email,
    })
}
