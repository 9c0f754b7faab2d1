/// Integration tests for the group authorization gate
///
/// This test module covers:
/// - Join admission per group policy
/// - Write gating on active membership
/// - Member management permissions and the owner guard
/// - The member status machine
/// - Event capacity admission
use chrono::Utc;
use huddle_api::models::{GroupMember, JoinPolicy, MemberRole, MemberStatus, RsvpStatus};
use huddle_api::services::events::ensure_capacity;
use huddle_api::services::membership::{
    admission_for, ensure_status_transition, ensure_target_mutable, require_active_member,
    require_manager,
};
use huddle_api::ApiError;
use uuid::Uuid;

fn member(role: MemberRole, status: MemberStatus) -> GroupMember {
    GroupMember {
        id: Uuid::new_v4(),
        group_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        role,
        status,
        created_at: Utc::now(),
    }
}

// ============================================================================
// Join Admission Tests
// ============================================================================

#[test]
fn test_join_admission_follows_group_policy() {
    assert_eq!(admission_for(JoinPolicy::Open).unwrap(), MemberStatus::Active);
    assert_eq!(
        admission_for(JoinPolicy::Request).unwrap(),
        MemberStatus::Pending
    );
    assert!(matches!(
        admission_for(JoinPolicy::Invite),
        Err(ApiError::InviteOnly)
    ));
}

// ============================================================================
// Write Gate Tests
// ============================================================================

#[test]
fn test_only_active_members_pass_the_write_gate() {
    let active = member(MemberRole::Member, MemberStatus::Active);
    assert!(require_active_member(Some(&active)).is_ok());

    let pending = member(MemberRole::Member, MemberStatus::Pending);
    assert!(matches!(
        require_active_member(Some(&pending)),
        Err(ApiError::NotAMember)
    ));

    let banned = member(MemberRole::Admin, MemberStatus::Banned);
    assert!(
        matches!(
            require_active_member(Some(&banned)),
            Err(ApiError::NotAMember)
        ),
        "a ban overrides any role"
    );

    assert!(matches!(
        require_active_member(None),
        Err(ApiError::NotAMember)
    ));
}

// ============================================================================
// Member Management Tests
// ============================================================================

#[test]
fn test_management_requires_owner_or_admin() {
    let owner = member(MemberRole::Owner, MemberStatus::Active);
    let admin = member(MemberRole::Admin, MemberStatus::Active);
    let plain = member(MemberRole::Member, MemberStatus::Active);

    assert!(require_manager(Some(&owner)).is_ok());
    assert!(require_manager(Some(&admin)).is_ok());
    assert!(matches!(
        require_manager(Some(&plain)),
        Err(ApiError::InsufficientPermissions)
    ));
    assert!(matches!(
        require_manager(None),
        Err(ApiError::InsufficientPermissions)
    ));
}

#[test]
fn test_the_owner_row_is_never_a_valid_update_target() {
    let owner = member(MemberRole::Owner, MemberStatus::Active);
    assert!(matches!(
        ensure_target_mutable(&owner),
        Err(ApiError::CannotModifyOwner)
    ));

    let admin = member(MemberRole::Admin, MemberStatus::Active);
    let plain = member(MemberRole::Member, MemberStatus::Pending);
    assert!(ensure_target_mutable(&admin).is_ok());
    assert!(ensure_target_mutable(&plain).is_ok());
}

// ============================================================================
// Status Machine Tests
// ============================================================================

#[test]
fn test_status_machine_permits_approval_demotion_and_bans() {
    assert!(ensure_status_transition(MemberStatus::Pending, MemberStatus::Active).is_ok());
    assert!(ensure_status_transition(MemberStatus::Active, MemberStatus::Pending).is_ok());
    assert!(ensure_status_transition(MemberStatus::Pending, MemberStatus::Banned).is_ok());
    assert!(ensure_status_transition(MemberStatus::Active, MemberStatus::Banned).is_ok());
}

#[test]
fn test_status_machine_treats_banned_as_terminal() {
    for target in [MemberStatus::Active, MemberStatus::Pending] {
        assert!(
            matches!(
                ensure_status_transition(MemberStatus::Banned, target),
                Err(ApiError::Validation(_))
            ),
            "banned -> {target:?} must be rejected"
        );
    }

    // Writing the same status back is always fine.
    assert!(ensure_status_transition(MemberStatus::Banned, MemberStatus::Banned).is_ok());
}

// ============================================================================
// Event Capacity Tests
// ============================================================================

#[test]
fn test_capacity_only_gates_going_rsvps() {
    assert!(ensure_capacity(Some(10), 10, RsvpStatus::Interested).is_ok());
    assert!(ensure_capacity(Some(10), 10, RsvpStatus::NotGoing).is_ok());
    assert!(matches!(
        ensure_capacity(Some(10), 10, RsvpStatus::Going),
        Err(ApiError::CapacityReached)
    ));
}

#[test]
fn test_unlimited_events_never_fill_up() {
    assert!(ensure_capacity(None, 1_000_000, RsvpStatus::Going).is_ok());
}

#[test]
fn test_last_seat_is_grantable() {
    assert!(ensure_capacity(Some(10), 9, RsvpStatus::Going).is_ok());
    assert!(ensure_capacity(Some(0), 0, RsvpStatus::Going).is_err());
}
