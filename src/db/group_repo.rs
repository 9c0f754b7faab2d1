use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Group, GroupVisibility, JoinPolicy};

pub struct NewGroup<'a> {
    pub created_by: Uuid,
    pub slug: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub visibility: GroupVisibility,
    pub join_policy: JoinPolicy,
    pub tags: &'a [String],
    pub city: Option<&'a str>,
    pub country: Option<&'a str>,
}

/// Runs inside the create-group transaction so the owner membership row
/// lands atomically with the group itself.
pub async fn insert(tx: &mut Transaction<'_, Postgres>, group: NewGroup<'_>) -> Result<Group> {
    let row = sqlx::query_as::<_, Group>(
        r#"
        INSERT INTO groups (created_by, slug, name, description, visibility, join_policy, tags, city, country)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(group.created_by)
    .bind(group.slug)
    .bind(group.name)
    .bind(group.description)
    .bind(group.visibility)
    .bind(group.join_policy)
    .bind(group.tags)
    .bind(group.city)
    .bind(group.country)
    .fetch_one(&mut **tx)
    .await?;

    Ok(row)
}

pub async fn find_by_id(pool: &PgPool, group_id: Uuid) -> Result<Option<Group>> {
    let group = sqlx::query_as::<_, Group>(
        r#"
        SELECT * FROM groups WHERE id = $1
        "#,
    )
    .bind(group_id)
    .fetch_optional(pool)
    .await?;

    Ok(group)
}

/// List groups with optional filters: exact city, tag containment and
/// visibility.
pub async fn list(
    pool: &PgPool,
    city: Option<&str>,
    tag: Option<&str>,
    visibility: Option<GroupVisibility>,
) -> Result<Vec<Group>> {
    let groups = sqlx::query_as::<_, Group>(
        r#"
        SELECT * FROM groups
        WHERE ($1::text IS NULL OR city = $1)
          AND ($2::text IS NULL OR $2 = ANY(tags))
          AND ($3::group_visibility IS NULL OR visibility = $3)
        ORDER BY created_at DESC
        "#,
    )
    .bind(city)
    .bind(tag)
    .bind(visibility)
    .fetch_all(pool)
    .await?;

    Ok(groups)
}
