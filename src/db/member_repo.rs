use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{GroupMember, MemberRole, MemberStatus, MemberWithProfile};

pub async fn find(pool: &PgPool, group_id: Uuid, user_id: Uuid) -> Result<Option<GroupMember>> {
    let member = sqlx::query_as::<_, GroupMember>(
        r#"
        SELECT * FROM group_members WHERE group_id = $1 AND user_id = $2
        "#,
    )
    .bind(group_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(member)
}

pub async fn insert(
    pool: &PgPool,
    group_id: Uuid,
    user_id: Uuid,
    role: MemberRole,
    status: MemberStatus,
) -> Result<GroupMember> {
    let member = sqlx::query_as::<_, GroupMember>(
        r#"
        INSERT INTO group_members (group_id, user_id, role, status)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(group_id)
    .bind(user_id)
    .bind(role)
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok(member)
}

/// Owner row insertion, part of the create-group transaction.
pub async fn insert_owner(
    tx: &mut Transaction<'_, Postgres>,
    group_id: Uuid,
    user_id: Uuid,
) -> Result<GroupMember> {
    let member = sqlx::query_as::<_, GroupMember>(
        r#"
        INSERT INTO group_members (group_id, user_id, role, status)
        VALUES ($1, $2, 'owner', 'active')
        RETURNING *
        "#,
    )
    .bind(group_id)
    .bind(user_id)
    .fetch_one(&mut **tx)
    .await?;

    Ok(member)
}

pub async fn update(
    pool: &PgPool,
    member_id: Uuid,
    role: MemberRole,
    status: MemberStatus,
) -> Result<GroupMember> {
    let member = sqlx::query_as::<_, GroupMember>(
        r#"
        UPDATE group_members SET role = $1, status = $2
        WHERE id = $3
        RETURNING *
        "#,
    )
    .bind(role)
    .bind(status)
    .bind(member_id)
    .fetch_one(pool)
    .await?;

    Ok(member)
}

pub async fn list_by_group(pool: &PgPool, group_id: Uuid) -> Result<Vec<MemberWithProfile>> {
    let members = sqlx::query_as::<_, MemberWithProfile>(
        r#"
        SELECT m.id, m.role, m.status, u.id AS user_id, u.email, u.name, u.picture
        FROM group_members m
        JOIN users u ON u.id = m.user_id
        WHERE m.group_id = $1
        ORDER BY m.created_at ASC
        "#,
    )
    .bind(group_id)
    .fetch_all(pool)
    .await?;

    Ok(members)
}
