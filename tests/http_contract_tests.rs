/// Tests for the HTTP error contract and request payload shapes
///
/// This test module covers:
/// - Error to status code mapping
/// - The `{error, message}` error body and its stable codes
/// - camelCase request payload deserialization and validation
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::ResponseError;
use huddle_api::handlers::auth::{RegisterRequest, ResetPasswordRequest};
use huddle_api::models::RsvpStatus;
use huddle_api::services::membership::{AssignableRole, MemberUpdate};
use huddle_api::ApiError;
use validator::Validate;

// ============================================================================
// Status Code Mapping Tests
// ============================================================================

#[test]
fn test_credential_failures_map_to_401() {
    assert_eq!(
        ApiError::InvalidCredentials.status_code(),
        StatusCode::UNAUTHORIZED
    );
}

#[test]
fn test_authorization_failures_map_to_403() {
    for err in [
        ApiError::EmailNotVerified,
        ApiError::NotAMember,
        ApiError::InsufficientPermissions,
        ApiError::CannotModifyOwner,
        ApiError::InviteOnly,
    ] {
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN, "{err}");
    }
}

#[test]
fn test_conflicts_map_to_409() {
    assert_eq!(ApiError::EmailTaken.status_code(), StatusCode::CONFLICT);
    assert_eq!(ApiError::CapacityReached.status_code(), StatusCode::CONFLICT);
}

#[test]
fn test_bad_input_maps_to_400() {
    for err in [
        ApiError::PasswordMismatch,
        ApiError::InvalidToken,
        ApiError::TokenExpired,
        ApiError::Validation("email".into()),
    ] {
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST, "{err}");
    }
}

#[test]
fn test_missing_resources_map_to_404() {
    assert_eq!(
        ApiError::NotFound("Group").status_code(),
        StatusCode::NOT_FOUND
    );
}

#[test]
fn test_server_side_failures_map_to_500() {
    assert_eq!(
        ApiError::Internal("boom".into()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        ApiError::Email("smtp down".into()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

// ============================================================================
// Error Body Tests
// ============================================================================

#[actix_web::test]
async fn test_error_body_carries_stable_code_and_message() {
    let response = ApiError::InviteOnly.error_response();
    let body = to_bytes(response.into_body()).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"], "INVITE_ONLY");
    assert_eq!(json["message"], "This group can only be joined by invitation");
}

#[actix_web::test]
async fn test_internal_details_never_reach_the_body() {
    let response = ApiError::Internal("pg connection refused".into()).error_response();
    let body = to_bytes(response.into_body()).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"], "INTERNAL_ERROR");
    assert_eq!(json["message"], "Internal server error");
}

#[actix_web::test]
async fn test_not_found_body_names_the_resource() {
    let response = ApiError::NotFound("Event").error_response();
    let body = to_bytes(response.into_body()).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"], "NOT_FOUND");
    assert_eq!(json["message"], "Event not found");
}

// ============================================================================
// Request Payload Tests
// ============================================================================

#[test]
fn test_register_request_uses_camel_case_keys() {
    let payload: RegisterRequest = serde_json::from_value(serde_json::json!({
        "email": "alice@example.com",
        "password": "Sup3r$ecret",
        "confirmPassword": "Sup3r$ecret",
        "documentId": "12345678"
    }))
    .unwrap();

    assert!(payload.validate().is_ok());
    assert_eq!(payload.confirm_password, "Sup3r$ecret");
    assert_eq!(payload.document_id.as_deref(), Some("12345678"));
}

#[test]
fn test_register_request_rejects_weak_passwords() {
    let payload: RegisterRequest = serde_json::from_value(serde_json::json!({
        "email": "alice@example.com",
        "password": "weak",
        "confirmPassword": "weak"
    }))
    .unwrap();

    assert!(payload.validate().is_err());
}

#[test]
fn test_reset_request_validates_the_new_password() {
    let payload: ResetPasswordRequest = serde_json::from_value(serde_json::json!({
        "email": "alice@example.com",
        "token": "deadbeef",
        "newPassword": "short",
        "confirmPassword": "short"
    }))
    .unwrap();

    assert!(payload.validate().is_err());
}

#[test]
fn test_member_update_deserializes_snake_case_values() {
    let update: MemberUpdate =
        serde_json::from_value(serde_json::json!({ "role": "admin", "status": "banned" })).unwrap();

    assert_eq!(update.role, Some(AssignableRole::Admin));
    assert!(update.status.is_some());

    // Owner is not an assignable role.
    let err = serde_json::from_value::<MemberUpdate>(serde_json::json!({ "role": "owner" }));
    assert!(err.is_err());
}

#[test]
fn test_rsvp_status_wire_values() {
    assert_eq!(
        serde_json::from_str::<RsvpStatus>("\"not_going\"").unwrap(),
        RsvpStatus::NotGoing
    );
    assert_eq!(
        serde_json::to_string(&RsvpStatus::Going).unwrap(),
        "\"going\""
    );
}
