/// Post likes. Liking twice is a no-op returning the existing row.
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::like_repo;
use crate::error::Result;
use crate::models::PostLike;

pub async fn like(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<PostLike> {
    if let Some(existing) = like_repo::find(pool, post_id, user_id).await? {
        return Ok(existing);
    }

    like_repo::insert(pool, post_id, user_id).await
}

pub async fn unlike(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<()> {
    like_repo::delete(pool, post_id, user_id).await?;
    Ok(())
}

pub async fn count(pool: &PgPool, post_id: Uuid) -> Result<i64> {
    like_repo::count(pool, post_id).await
}
