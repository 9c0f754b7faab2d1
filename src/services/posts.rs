/// Group posts, gated on active membership.
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{member_repo, post_repo};
use crate::error::Result;
use crate::models::{Post, PostWithAuthor};
use crate::services::membership::require_active_member;

pub async fn create_post(
    pool: &PgPool,
    group_id: Uuid,
    author_id: Uuid,
    content: &str,
) -> Result<Post> {
    let membership = member_repo::find(pool, group_id, author_id).await?;
    require_active_member(membership.as_ref())?;

    post_repo::insert(pool, group_id, author_id, content).await
}

pub async fn list_posts(pool: &PgPool, group_id: Uuid) -> Result<Vec<PostWithAuthor>> {
    post_repo::list_by_group(pool, group_id).await
}
