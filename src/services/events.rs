/// Events and RSVPs. The capacity rule only applies to `going` on events
/// with a finite capacity; the count-then-upsert is best effort under
/// concurrency (see DESIGN.md).
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{event_repo, group_repo};
use crate::error::{ApiError, Result};
use crate::models::{Event, EventRsvp, EventWithGroup, RsvpStatus};

const PUBLIC_FEED_LIMIT: i64 = 10;

pub struct CreateEvent<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub timezone: Option<&'a str>,
    pub venue_kind: Option<&'a str>,
    pub venue_name: Option<&'a str>,
    pub venue_link: Option<&'a str>,
    pub capacity: Option<i32>,
    pub status: Option<&'a str>,
    pub city: Option<&'a str>,
    pub country: Option<&'a str>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

pub async fn create_event(
    pool: &PgPool,
    group_id: Uuid,
    host_id: Uuid,
    input: CreateEvent<'_>,
) -> Result<Event> {
    group_repo::find_by_id(pool, group_id)
        .await?
        .ok_or(ApiError::NotFound("Group"))?;

    let event = event_repo::insert(
        pool,
        event_repo::NewEvent {
            group_id,
            host_id,
            title: input.title,
            description: input.description,
            start_at: input.start_at,
            end_at: input.end_at,
            timezone: input.timezone,
            venue_kind: input.venue_kind,
            venue_name: input.venue_name,
            venue_link: input.venue_link,
            capacity: input.capacity,
            status: input.status.unwrap_or("scheduled"),
            city: input.city,
            country: input.country,
            lat: input.lat,
            lng: input.lng,
        },
    )
    .await?;

    tracing::info!(event_id = %event.id, %group_id, "event created");
    Ok(event)
}

pub async fn list_group_events(pool: &PgPool, group_id: Uuid) -> Result<Vec<Event>> {
    event_repo::list_by_group(pool, group_id).await
}

pub async fn list_public_events(pool: &PgPool) -> Result<Vec<EventWithGroup>> {
    event_repo::list_public_upcoming(pool, PUBLIC_FEED_LIMIT).await
}

pub async fn list_rsvps(pool: &PgPool, event_id: Uuid) -> Result<Vec<EventRsvp>> {
    event_repo::find_by_id(pool, event_id)
        .await?
        .ok_or(ApiError::NotFound("Event"))?;

    event_repo::list_rsvps(pool, event_id).await
}

/// Capacity gate: only `going` consumes a slot, and only finite
/// capacities are enforced.
pub fn ensure_capacity(capacity: Option<i32>, going: i64, requested: RsvpStatus) -> Result<()> {
    if requested != RsvpStatus::Going {
        return Ok(());
    }

    match capacity {
        Some(cap) if going >= cap as i64 => Err(ApiError::CapacityReached),
        _ => Ok(()),
    }
}

/// RSVP upsert keyed by (event, user): re-RSVPing overwrites the prior
/// status, so switching away from `going` frees the slot.
pub async fn rsvp(
    pool: &PgPool,
    event_id: Uuid,
    user_id: Uuid,
    status: RsvpStatus,
) -> Result<EventRsvp> {
    let event = event_repo::find_by_id(pool, event_id)
        .await?
        .ok_or(ApiError::NotFound("Event"))?;

    if status == RsvpStatus::Going && event.capacity.is_some() {
        let going = event_repo::count_going(pool, event_id).await?;
        ensure_capacity(event.capacity, going, status)?;
    }

    event_repo::upsert_rsvp(pool, event_id, user_id, status).await
}

pub async fn remove_rsvp(pool: &PgPool, event_id: Uuid, user_id: Uuid) -> Result<()> {
    event_repo::delete_rsvp(pool, event_id, user_id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn going_over_capacity_is_rejected() {
        assert!(matches!(
            ensure_capacity(Some(1), 1, RsvpStatus::Going),
            Err(ApiError::CapacityReached)
        ));
        assert!(matches!(
            ensure_capacity(Some(5), 7, RsvpStatus::Going),
            Err(ApiError::CapacityReached)
        ));
    }

    #[test]
    fn going_under_capacity_is_admitted() {
        assert!(ensure_capacity(Some(1), 0, RsvpStatus::Going).is_ok());
        assert!(ensure_capacity(Some(10), 9, RsvpStatus::Going).is_ok());
    }

    #[test]
    fn unlimited_capacity_always_admits() {
        assert!(ensure_capacity(None, 1_000_000, RsvpStatus::Going).is_ok());
    }

    #[test]
    fn non_going_statuses_bypass_the_gate() {
        assert!(ensure_capacity(Some(1), 5, RsvpStatus::Interested).is_ok());
        assert!(ensure_capacity(Some(1), 5, RsvpStatus::NotGoing).is_ok());
    }
}
