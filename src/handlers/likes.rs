use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::likes;
use crate::AppState;

pub async fn like(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let like = likes::like(&state.db, path.into_inner(), user.id).await?;
    Ok(HttpResponse::Ok().json(like))
}

pub async fn unlike(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    likes::unlike(&state.db, path.into_inner(), user.id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

pub async fn count(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let post_id = path.into_inner();
    let likes = likes::count(&state.db, post_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "post_id": post_id,
        "likes": likes,
    })))
}
