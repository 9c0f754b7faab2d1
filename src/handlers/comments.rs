use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::comments;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}

pub async fn create(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<Uuid>,
    payload: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;

    let comment =
        comments::create_comment(&state.db, path.into_inner(), user.id, &payload.content).await?;

    Ok(HttpResponse::Created().json(comment))
}

pub async fn find_by_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let comments = comments::list_comments(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comments))
}
