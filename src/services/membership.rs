/// Membership authorization gate: pure decision functions over fetched
/// membership rows, plus the join/update services that apply them.
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{group_repo, member_repo};
use crate::error::{ApiError, Result};
use crate::models::{GroupMember, JoinPolicy, MemberRole, MemberStatus};

/// Roles an admin/owner may assign through the member-update path.
/// `owner` is intentionally absent: the owner row is immutable and the
/// role is never granted after group creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignableRole {
    Admin,
    Member,
}

impl From<AssignableRole> for MemberRole {
    fn from(role: AssignableRole) -> Self {
        match role {
            AssignableRole::Admin => MemberRole::Admin,
            AssignableRole::Member => MemberRole::Member,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MemberUpdate {
    pub role: Option<AssignableRole>,
    pub status: Option<MemberStatus>,
}

/// Join admission by group policy: open groups admit immediately, request
/// groups park the member as pending, invite-only groups reject self-join.
pub fn admission_for(policy: JoinPolicy) -> Result<MemberStatus> {
    match policy {
        JoinPolicy::Open => Ok(MemberStatus::Active),
        JoinPolicy::Request => Ok(MemberStatus::Pending),
        JoinPolicy::Invite => Err(ApiError::InviteOnly),
    }
}

/// Posting, commenting and similar group-scoped writes require an active
/// membership, any role.
pub fn require_active_member(membership: Option<&GroupMember>) -> Result<&GroupMember> {
    match membership {
        Some(m) if m.status == MemberStatus::Active => Ok(m),
        _ => Err(ApiError::NotAMember),
    }
}

/// Managing members requires the actor to be the group owner or an admin.
pub fn require_manager(membership: Option<&GroupMember>) -> Result<&GroupMember> {
    match membership {
        Some(m) if m.role == MemberRole::Owner || m.role == MemberRole::Admin => Ok(m),
        _ => Err(ApiError::InsufficientPermissions),
    }
}

/// The owner row cannot be touched through the update path, whoever asks.
pub fn ensure_target_mutable(target: &GroupMember) -> Result<()> {
    if target.role == MemberRole::Owner {
        return Err(ApiError::CannotModifyOwner);
    }
    Ok(())
}

/// Status machine: pending and active flip freely, either may be banned,
/// and banned is terminal through this path.
pub fn ensure_status_transition(from: MemberStatus, to: MemberStatus) -> Result<()> {
    if from == to {
        return Ok(());
    }

    match (from, to) {
        (MemberStatus::Pending, MemberStatus::Active)
        | (MemberStatus::Active, MemberStatus::Pending)
        | (MemberStatus::Pending, MemberStatus::Banned)
        | (MemberStatus::Active, MemberStatus::Banned) => Ok(()),
        _ => Err(ApiError::Validation(format!(
            "membership status cannot change from {from:?} to {to:?}"
        ))),
    }
}

/// Self-join. An existing membership row of any status short-circuits and
/// is returned unchanged, making the call idempotent.
pub async fn join_group(pool: &PgPool, group_id: Uuid, user_id: Uuid) -> Result<GroupMember> {
    let group = group_repo::find_by_id(pool, group_id)
        .await?
        .ok_or(ApiError::NotFound("Group"))?;

    if let Some(existing) = member_repo::find(pool, group_id, user_id).await? {
        return Ok(existing);
    }

    let status = admission_for(group.join_policy)?;
    let member = member_repo::insert(pool, group_id, user_id, MemberRole::Member, status).await?;

    tracing::info!(%group_id, %user_id, ?status, "membership created");
    Ok(member)
}

/// Role/status update of a target member by an owner/admin actor.
pub async fn update_member(
    pool: &PgPool,
    group_id: Uuid,
    target_user_id: Uuid,
    acting_user_id: Uuid,
    update: MemberUpdate,
) -> Result<GroupMember> {
    let actor = member_repo::find(pool, group_id, acting_user_id).await?;
    require_manager(actor.as_ref())?;

    let target = member_repo::find(pool, group_id, target_user_id)
        .await?
        .ok_or(ApiError::NotFound("Member"))?;
    ensure_target_mutable(&target)?;

    let role = update.role.map(MemberRole::from).unwrap_or(target.role);
    let status = update.status.unwrap_or(target.status);
    ensure_status_transition(target.status, status)?;

    let updated = member_repo::update(pool, target.id, role, status).await?;

    tracing::info!(%group_id, %target_user_id, ?role, ?status, "membership updated");
    Ok(updated)
}
