use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::{GroupVisibility, JoinPolicy};
use crate::services::membership::{self, MemberUpdate};
use crate::services::groups;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,

    pub description: Option<String>,
    pub visibility: GroupVisibility,
    pub join_policy: JoinPolicy,

    #[serde(default)]
    pub tags: Vec<String>,

    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GroupFilters {
    pub city: Option<String>,
    pub tag: Option<String>,
    pub visibility: Option<GroupVisibility>,
}

pub async fn create(
    state: web::Data<AppState>,
    user: AuthUser,
    payload: web::Json<CreateGroupRequest>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;

    let group = groups::create_group(
        &state.db,
        user.id,
        groups::CreateGroup {
            name: &payload.name,
            description: payload.description.as_deref(),
            visibility: payload.visibility,
            join_policy: payload.join_policy,
            tags: &payload.tags,
            city: payload.city.as_deref(),
            country: payload.country.as_deref(),
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(group))
}

pub async fn find_one(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let group = groups::find_group(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(group))
}

pub async fn find_all(
    state: web::Data<AppState>,
    filters: web::Query<GroupFilters>,
) -> Result<HttpResponse, ApiError> {
    let groups = groups::list_groups(
        &state.db,
        filters.city.as_deref(),
        filters.tag.as_deref(),
        filters.visibility,
    )
    .await?;

    Ok(HttpResponse::Ok().json(groups))
}

pub async fn join(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let membership = membership::join_group(&state.db, path.into_inner(), user.id).await?;
    Ok(HttpResponse::Ok().json(membership))
}

/// Member emails are exposed here, so unlike the group listings this
/// endpoint requires a session.
pub async fn list_members(
    state: web::Data<AppState>,
    _user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let members = groups::list_members(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(members))
}

pub async fn update_member(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<(Uuid, Uuid)>,
    payload: web::Json<MemberUpdate>,
) -> Result<HttpResponse, ApiError> {
    let (group_id, target_user_id) = path.into_inner();

    let updated = membership::update_member(
        &state.db,
        group_id,
        target_user_id,
        user.id,
        *payload,
    )
    .await?;

    Ok(HttpResponse::Ok().json(updated))
}
