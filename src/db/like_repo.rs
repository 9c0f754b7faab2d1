use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::PostLike;

pub async fn find(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<Option<PostLike>> {
    let like = sqlx::query_as::<_, PostLike>(
        r#"
        SELECT * FROM post_likes WHERE post_id = $1 AND user_id = $2
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(like)
}

pub async fn insert(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<PostLike> {
    let like = sqlx::query_as::<_, PostLike>(
        r#"
        INSERT INTO post_likes (post_id, user_id)
        VALUES ($1, $2)
        RETURNING *
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(like)
}

pub async fn delete(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn count(pool: &PgPool, post_id: Uuid) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM post_likes WHERE post_id = $1
        "#,
    )
    .bind(post_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
