/// Shared input validation helpers used by the request DTOs.
use validator::{ValidateEmail, ValidationError};

/// Canonical form used for every email lookup: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_email(email: &str) -> bool {
    email.validate_email()
}

/// Password policy: minimum 8 characters with at least one lowercase,
/// one uppercase, one digit and one special character.
pub fn password_strength(password: &str) -> Result<(), ValidationError> {
    if password.len() < 8 {
        return Err(ValidationError::new("password_too_short"));
    }

    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| !c.is_alphanumeric());

    if has_lower && has_upper && has_digit && has_special {
        Ok(())
    } else {
        Err(ValidationError::new("password_too_weak"))
    }
}

/// National document id: 6 to 12 digits.
pub fn document_id_format(document_id: &str) -> Result<(), ValidationError> {
    let len_ok = (6..=12).contains(&document_id.len());
    if len_ok && document_id.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_document_id"))
    }
}

/// OTP codes are exactly 6 digits.
pub fn otp_code_format(code: &str) -> Result<(), ValidationError> {
    if code.len() == 6 && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_otp_code"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_email("  Alice@X.COM "), "alice@x.com");
    }

    #[test]
    fn strong_password_passes() {
        assert!(password_strength("P4ss!word").is_ok());
    }

    #[test]
    fn weak_passwords_fail() {
        assert!(password_strength("short1!").is_err());
        assert!(password_strength("alllowercase1!").is_err());
        assert!(password_strength("ALLUPPERCASE1!").is_err());
        assert!(password_strength("NoDigits!!").is_err());
        assert!(password_strength("NoSpecial123").is_err());
    }

    #[test]
    fn document_id_bounds() {
        assert!(document_id_format("123456").is_ok());
        assert!(document_id_format("123456789012").is_ok());
        assert!(document_id_format("12345").is_err());
        assert!(document_id_format("1234567890123").is_err());
        assert!(document_id_format("12345a").is_err());
    }

    #[test]
    fn otp_code_shape() {
        assert!(otp_code_format("123456").is_ok());
        assert!(otp_code_format("12345").is_err());
        assert!(otp_code_format("1234567").is_err());
        assert!(otp_code_format("12345a").is_err());
    }
}
