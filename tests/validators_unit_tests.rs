/// Unit tests for the input validation helpers
///
/// This test module covers:
/// - Email normalization and format checks
/// - Password strength policy
/// - Document id and OTP code formats
use huddle_api::validators::{
    document_id_format, normalize_email, otp_code_format, password_strength, validate_email,
};

// ============================================================================
// Email Tests
// ============================================================================

#[test]
fn test_normalize_email_lowercases_and_trims() {
    assert_eq!(normalize_email("  Alice@Example.COM  "), "alice@example.com");
    assert_eq!(normalize_email("bob@site.io"), "bob@site.io");
}

#[test]
fn test_validate_email_accepts_common_addresses() {
    assert!(validate_email("alice@example.com"));
    assert!(validate_email("a.b+tag@sub.domain.org"));
}

#[test]
fn test_validate_email_rejects_malformed_addresses() {
    assert!(!validate_email(""));
    assert!(!validate_email("not-an-email"));
    assert!(!validate_email("missing@tld@twice.com"));
    assert!(!validate_email("@no-local-part.com"));
}

// ============================================================================
// Password Strength Tests
// ============================================================================

#[test]
fn test_password_strength_accepts_compliant_passwords() {
    assert!(password_strength("Sup3r$ecret").is_ok());
    assert!(password_strength("Aa1!aaaa").is_ok(), "8 chars is the minimum");
}

#[test]
fn test_password_strength_rejects_short_passwords() {
    assert!(password_strength("Aa1!a").is_err());
}

#[test]
fn test_password_strength_requires_each_character_class() {
    assert!(password_strength("alllowercase1!").is_err(), "missing uppercase");
    assert!(password_strength("ALLUPPERCASE1!").is_err(), "missing lowercase");
    assert!(password_strength("NoDigitsHere!").is_err(), "missing digit");
    assert!(password_strength("NoSpecials123").is_err(), "missing special");
}

// ============================================================================
// Document Id / OTP Format Tests
// ============================================================================

#[test]
fn test_document_id_format_accepts_6_to_12_digits() {
    assert!(document_id_format("123456").is_ok());
    assert!(document_id_format("123456789012").is_ok());
}

#[test]
fn test_document_id_format_rejects_bad_input() {
    assert!(document_id_format("12345").is_err(), "too short");
    assert!(document_id_format("1234567890123").is_err(), "too long");
    assert!(document_id_format("12345a").is_err(), "non-digit");
}

#[test]
fn test_otp_code_format_requires_exactly_six_digits() {
    assert!(otp_code_format("004217").is_ok());
    assert!(otp_code_format("12345").is_err());
    assert!(otp_code_format("1234567").is_err());
    assert!(otp_code_format("12a456").is_err());
}
