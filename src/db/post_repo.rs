use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Post, PostWithAuthor};

pub async fn insert(pool: &PgPool, group_id: Uuid, author_id: Uuid, content: &str) -> Result<Post> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (group_id, author_id, content)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(group_id)
    .bind(author_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

pub async fn find_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT * FROM posts WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

pub async fn list_by_group(pool: &PgPool, group_id: Uuid) -> Result<Vec<PostWithAuthor>> {
    let posts = sqlx::query_as::<_, PostWithAuthor>(
        r#"
        SELECT p.id, p.group_id, p.content, p.created_at,
               u.id AS author_id, u.email AS author_email,
               u.name AS author_name, u.picture AS author_picture
        FROM posts p
        JOIN users u ON u.id = p.author_id
        WHERE p.group_id = $1
        ORDER BY p.created_at DESC
        "#,
    )
    .bind(group_id)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}
