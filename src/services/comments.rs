/// Comments on posts. The gate applies to the group of the commented
/// post, resolved through the post row.
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_repo, member_repo, post_repo};
use crate::error::{ApiError, Result};
use crate::models::{Comment, CommentWithAuthor};
use crate::services::membership::require_active_member;

pub async fn create_comment(
    pool: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
    content: &str,
) -> Result<Comment> {
    let post = post_repo::find_by_id(pool, post_id)
        .await?
        .ok_or(ApiError::NotFound("Post"))?;

    let membership = member_repo::find(pool, post.group_id, author_id).await?;
    require_active_member(membership.as_ref())?;

    comment_repo::insert(pool, post_id, author_id, content).await
}

pub async fn list_comments(pool: &PgPool, post_id: Uuid) -> Result<Vec<CommentWithAuthor>> {
    comment_repo::list_by_post(pool, post_id).await
}
