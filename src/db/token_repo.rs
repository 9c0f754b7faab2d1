/// Storage for single-use tokens. The three purposes map to three tables
/// with an identical shape, so one repository serves all of them.
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::SingleUseToken;
use crate::services::tokens::TokenPurpose;

/// Invalidate-on-issue: every prior unconsumed token of the same purpose
/// goes away before a new one is written.
pub async fn delete_unconsumed(pool: &PgPool, purpose: TokenPurpose, user_id: Uuid) -> Result<u64> {
    let sql = format!(
        "DELETE FROM {} WHERE user_id = $1 AND consumed_at IS NULL",
        purpose.table()
    );

    let result = sqlx::query(&sql).bind(user_id).execute(pool).await?;
    Ok(result.rows_affected())
}

pub async fn insert(
    pool: &PgPool,
    purpose: TokenPurpose,
    user_id: Uuid,
    token_hash: &str,
    expires_at: DateTime<Utc>,
) -> Result<SingleUseToken> {
    let sql = format!(
        r#"
        INSERT INTO {} (user_id, token_hash, expires_at)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
        purpose.table()
    );

    let token = sqlx::query_as::<_, SingleUseToken>(&sql)
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .fetch_one(pool)
        .await?;

    Ok(token)
}

/// All unconsumed tokens for an owner. Bounded to ~1 row in practice by the
/// invalidate-on-issue rule; callers scan-and-verify because the digests
/// are salted and cannot be looked up directly.
pub async fn list_unconsumed(
    pool: &PgPool,
    purpose: TokenPurpose,
    user_id: Uuid,
) -> Result<Vec<SingleUseToken>> {
    let sql = format!(
        r#"
        SELECT * FROM {}
        WHERE user_id = $1 AND consumed_at IS NULL
        ORDER BY created_at DESC
        "#,
        purpose.table()
    );

    let tokens = sqlx::query_as::<_, SingleUseToken>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    Ok(tokens)
}

/// Consume exactly once: the guard on `consumed_at` makes a second attempt
/// report zero affected rows.
pub async fn mark_consumed(pool: &PgPool, purpose: TokenPurpose, token_id: Uuid) -> Result<u64> {
    let sql = format!(
        "UPDATE {} SET consumed_at = now() WHERE id = $1 AND consumed_at IS NULL",
        purpose.table()
    );

    let result = sqlx::query(&sql).bind(token_id).execute(pool).await?;
    Ok(result.rows_affected())
}
