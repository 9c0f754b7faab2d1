/// Group creation and listing. The creator becomes the group's single
/// owner in the same transaction that creates the group.
use rand::RngCore;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{group_repo, member_repo};
use crate::error::{ApiError, Result};
use crate::models::{Group, GroupVisibility, JoinPolicy, MemberWithProfile};

pub struct CreateGroup<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub visibility: GroupVisibility,
    pub join_policy: JoinPolicy,
    pub tags: &'a [String],
    pub city: Option<&'a str>,
    pub country: Option<&'a str>,
}

pub async fn create_group(pool: &PgPool, user_id: Uuid, input: CreateGroup<'_>) -> Result<Group> {
    let slug = make_slug(input.name);

    let mut tx = pool.begin().await?;

    let group = group_repo::insert(
        &mut tx,
        group_repo::NewGroup {
            created_by: user_id,
            slug: &slug,
            name: input.name,
            description: input.description,
            visibility: input.visibility,
            join_policy: input.join_policy,
            tags: input.tags,
            city: input.city,
            country: input.country,
        },
    )
    .await?;

    member_repo::insert_owner(&mut tx, group.id, user_id).await?;

    tx.commit().await?;

    tracing::info!(group_id = %group.id, %user_id, "group created");
    Ok(group)
}

pub async fn find_group(pool: &PgPool, group_id: Uuid) -> Result<Group> {
    group_repo::find_by_id(pool, group_id)
        .await?
        .ok_or(ApiError::NotFound("Group"))
}

pub async fn list_groups(
    pool: &PgPool,
    city: Option<&str>,
    tag: Option<&str>,
    visibility: Option<GroupVisibility>,
) -> Result<Vec<Group>> {
    group_repo::list(pool, city, tag, visibility).await
}

pub async fn list_members(pool: &PgPool, group_id: Uuid) -> Result<Vec<MemberWithProfile>> {
    member_repo::list_by_group(pool, group_id).await
}

/// URL slug from the group name plus an 8-hex-char suffix so renames and
/// duplicate names never collide.
fn make_slug(name: &str) -> String {
    let base: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();

    let mut parts = base.split('-').filter(|p| !p.is_empty());
    let mut slug = String::new();
    if let Some(first) = parts.next() {
        slug.push_str(first);
    }
    for part in parts {
        slug.push('-');
        slug.push_str(part);
    }

    let mut suffix = [0u8; 4];
    rand::thread_rng().fill_bytes(&mut suffix);

    if slug.is_empty() {
        hex::encode(suffix)
    } else {
        format!("{slug}-{}", hex::encode(suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_lowercased_and_dashed() {
        let slug = make_slug("Rust Meetup Madrid");
        assert!(slug.starts_with("rust-meetup-madrid-"));
        assert_eq!(slug.len(), "rust-meetup-madrid-".len() + 8);
    }

    #[test]
    fn slug_collapses_punctuation() {
        let slug = make_slug("C++ & Friends!!");
        assert!(slug.starts_with("c-friends-"));
    }

    #[test]
    fn slug_survives_non_ascii_names() {
        let slug = make_slug("日本語");
        assert_eq!(slug.len(), 8);
        assert!(slug.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn slugs_are_unique_per_call() {
        assert_ne!(make_slug("same name"), make_slug("same name"));
    }
}
