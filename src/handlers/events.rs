use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::RsvpStatus;
use crate::services::events;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    pub description: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub timezone: Option<String>,
    pub venue_kind: Option<String>,
    pub venue_name: Option<String>,
    pub venue_link: Option<String>,

    #[validate(range(min = 0))]
    pub capacity: Option<i32>,

    pub status: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RsvpRequest {
    pub status: RsvpStatus,
}

pub async fn create(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<Uuid>,
    payload: web::Json<CreateEventRequest>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;

    let event = events::create_event(
        &state.db,
        path.into_inner(),
        user.id,
        events::CreateEvent {
            title: &payload.title,
            description: payload.description.as_deref(),
            start_at: payload.start_at,
            end_at: payload.end_at,
            timezone: payload.timezone.as_deref(),
            venue_kind: payload.venue_kind.as_deref(),
            venue_name: payload.venue_name.as_deref(),
            venue_link: payload.venue_link.as_deref(),
            capacity: payload.capacity,
            status: payload.status.as_deref(),
            city: payload.city.as_deref(),
            country: payload.country.as_deref(),
            lat: payload.lat,
            lng: payload.lng,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(event))
}

pub async fn find_by_group(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let events = events::list_group_events(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(events))
}

pub async fn find_all_public(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let events = events::list_public_events(&state.db).await?;
    Ok(HttpResponse::Ok().json(events))
}

pub async fn list_rsvps(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let rsvps = events::list_rsvps(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(rsvps))
}

pub async fn rsvp(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<Uuid>,
    payload: web::Json<RsvpRequest>,
) -> Result<HttpResponse, ApiError> {
    let rsvp = events::rsvp(&state.db, path.into_inner(), user.id, payload.status).await?;
    Ok(HttpResponse::Ok().json(rsvp))
}

pub async fn remove_rsvp(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    events::remove_rsvp(&state.db, path.into_inner(), user.id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "ok": true })))
}
