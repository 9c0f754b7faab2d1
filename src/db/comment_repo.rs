use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Comment, CommentWithAuthor};

pub async fn insert(
    pool: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
    content: &str,
) -> Result<Comment> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO post_comments (post_id, author_id, content)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(post_id)
    .bind(author_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

pub async fn list_by_post(pool: &PgPool, post_id: Uuid) -> Result<Vec<CommentWithAuthor>> {
    let comments = sqlx::query_as::<_, CommentWithAuthor>(
        r#"
        SELECT c.id, c.post_id, c.content, c.created_at,
               u.id AS author_id, u.email AS author_email,
               u.name AS author_name, u.picture AS author_picture
        FROM post_comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.post_id = $1
        ORDER BY c.created_at ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}
