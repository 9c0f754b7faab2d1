use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Event, EventRsvp, EventWithGroup, RsvpStatus};

pub struct NewEvent<'a> {
    pub group_id: Uuid,
    pub host_id: Uuid,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub timezone: Option<&'a str>,
    pub venue_kind: Option<&'a str>,
    pub venue_name: Option<&'a str>,
    pub venue_link: Option<&'a str>,
    pub capacity: Option<i32>,
    pub status: &'a str,
    pub city: Option<&'a str>,
    pub country: Option<&'a str>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

pub async fn insert(pool: &PgPool, event: NewEvent<'_>) -> Result<Event> {
    let row = sqlx::query_as::<_, Event>(
        r#"
        INSERT INTO events (group_id, host_id, title, description, start_at, end_at, timezone,
                            venue_kind, venue_name, venue_link, capacity, status, city, country, lat, lng)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        RETURNING *
        "#,
    )
    .bind(event.group_id)
    .bind(event.host_id)
    .bind(event.title)
    .bind(event.description)
    .bind(event.start_at)
    .bind(event.end_at)
    .bind(event.timezone)
    .bind(event.venue_kind)
    .bind(event.venue_name)
    .bind(event.venue_link)
    .bind(event.capacity)
    .bind(event.status)
    .bind(event.city)
    .bind(event.country)
    .bind(event.lat)
    .bind(event.lng)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn find_by_id(pool: &PgPool, event_id: Uuid) -> Result<Option<Event>> {
    let event = sqlx::query_as::<_, Event>(
        r#"
        SELECT * FROM events WHERE id = $1
        "#,
    )
    .bind(event_id)
    .fetch_optional(pool)
    .await?;

    Ok(event)
}

pub async fn list_by_group(pool: &PgPool, group_id: Uuid) -> Result<Vec<Event>> {
    let events = sqlx::query_as::<_, Event>(
        r#"
        SELECT * FROM events WHERE group_id = $1 ORDER BY start_at ASC
        "#,
    )
    .bind(group_id)
    .fetch_all(pool)
    .await?;

    Ok(events)
}

/// Next events across public groups, joined with the group name.
pub async fn list_public_upcoming(pool: &PgPool, limit: i64) -> Result<Vec<EventWithGroup>> {
    let events = sqlx::query_as::<_, EventWithGroup>(
        r#"
        SELECT e.id, e.group_id, g.name AS group_name, e.title, e.description,
               e.start_at, e.end_at, e.capacity, e.status, e.city, e.country
        FROM events e
        JOIN groups g ON g.id = e.group_id
        WHERE g.visibility = 'public'
        ORDER BY e.start_at ASC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(events)
}

pub async fn count_going(pool: &PgPool, event_id: Uuid) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM event_rsvps WHERE event_id = $1 AND status = 'going'
        "#,
    )
    .bind(event_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Keyed by (event, user): a repeated RSVP overwrites the prior status
/// instead of duplicating the row.
pub async fn upsert_rsvp(
    pool: &PgPool,
    event_id: Uuid,
    user_id: Uuid,
    status: RsvpStatus,
) -> Result<EventRsvp> {
    let rsvp = sqlx::query_as::<_, EventRsvp>(
        r#"
        INSERT INTO event_rsvps (event_id, user_id, status)
        VALUES ($1, $2, $3)
        ON CONFLICT (event_id, user_id)
        DO UPDATE SET status = EXCLUDED.status, updated_at = now()
        RETURNING *
        "#,
    )
    .bind(event_id)
    .bind(user_id)
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok(rsvp)
}

pub async fn list_rsvps(pool: &PgPool, event_id: Uuid) -> Result<Vec<EventRsvp>> {
    let rsvps = sqlx::query_as::<_, EventRsvp>(
        r#"
        SELECT * FROM event_rsvps WHERE event_id = $1 ORDER BY created_at ASC
        "#,
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    Ok(rsvps)
}

pub async fn delete_rsvp(pool: &PgPool, event_id: Uuid, user_id: Uuid) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM event_rsvps WHERE event_id = $1 AND user_id = $2
        "#,
    )
    .bind(event_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
