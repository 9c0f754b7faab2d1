use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::posts;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
}

pub async fn create(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<Uuid>,
    payload: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;

    let post = posts::create_post(&state.db, path.into_inner(), user.id, &payload.content).await?;

    Ok(HttpResponse::Created().json(post))
}

pub async fn find_by_group(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let posts = posts::list_posts(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(posts))
}
