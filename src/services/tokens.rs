/// Single-use token lifecycle: issue, deliver out-of-band, redeem once.
///
/// The raw token leaves this module exactly once, at issue time; only its
/// argon2 digest is persisted.
use chrono::{DateTime, Duration, Utc};
use rand::{Rng, RngCore};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::token_repo;
use crate::error::{ApiError, Result};
use crate::models::SingleUseToken;
use crate::security::{hash_secret, verify_secret};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPurpose {
    EmailVerification,
    PasswordReset,
    OtpLogin,
}

impl TokenPurpose {
    pub fn table(self) -> &'static str {
        match self {
            TokenPurpose::EmailVerification => "email_verifications",
            TokenPurpose::PasswordReset => "password_resets",
            TokenPurpose::OtpLogin => "email_otp",
        }
    }

    /// Verification and reset links live for an hour; OTP codes for ten
    /// minutes.
    pub fn ttl(self) -> Duration {
        match self {
            TokenPurpose::EmailVerification | TokenPurpose::PasswordReset => Duration::hours(1),
            TokenPurpose::OtpLogin => Duration::minutes(10),
        }
    }
}

/// 32 bytes of CSPRNG entropy, hex encoded, for link tokens; a 6-digit
/// numeric code for OTP login.
pub fn generate_raw(purpose: TokenPurpose) -> String {
    match purpose {
        TokenPurpose::OtpLogin => {
            let code: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
            code.to_string()
        }
        _ => {
            let mut bytes = [0u8; 32];
            rand::thread_rng().fill_bytes(&mut bytes);
            hex::encode(bytes)
        }
    }
}

/// Create a fresh token for (user, purpose), invalidating all prior
/// unconsumed ones of the same purpose. Returns the raw token for
/// out-of-band delivery; it is never recoverable afterwards.
pub async fn issue(
    pool: &PgPool,
    user_id: Uuid,
    purpose: TokenPurpose,
) -> Result<(String, DateTime<Utc>)> {
    let raw = generate_raw(purpose);
    let token_hash = hash_secret(&raw)?;
    let expires_at = Utc::now() + purpose.ttl();

    // Not atomic with the insert below; a concurrent issue can briefly leave
    // two valid tokens, which is acceptable for these purposes.
    token_repo::delete_unconsumed(pool, purpose, user_id).await?;
    token_repo::insert(pool, purpose, user_id, &token_hash, expires_at).await?;

    Ok((raw, expires_at))
}

/// Pick the redeemable token for a candidate: linear scan (salted digests
/// are not indexable), argon2-verify each row, then check expiry on the
/// match only.
///
/// No verifying row is `InvalidToken`; a verifying row past its expiry is
/// `TokenExpired`. Expiry is a property of the matched token, never a
/// filter applied before matching.
fn select_match<'a>(
    tokens: &'a [SingleUseToken],
    candidate: &str,
    now: DateTime<Utc>,
) -> Result<&'a SingleUseToken> {
    for token in tokens {
        if !verify_secret(&token.token_hash, candidate)? {
            continue;
        }

        if token.expires_at < now {
            return Err(ApiError::TokenExpired);
        }

        return Ok(token);
    }

    Err(ApiError::InvalidToken)
}

/// Redeem a candidate token against the owner's unconsumed rows and
/// consume the match exactly once. A lost consume race reports
/// `InvalidToken`, same as no match.
pub async fn redeem(
    pool: &PgPool,
    user_id: Uuid,
    purpose: TokenPurpose,
    candidate: &str,
) -> Result<SingleUseToken> {
    let outstanding = token_repo::list_unconsumed(pool, purpose, user_id).await?;

    let matched = select_match(&outstanding, candidate, Utc::now())?;

    let consumed = token_repo::mark_consumed(pool, purpose, matched.id).await?;
    if consumed == 0 {
        return Err(ApiError::InvalidToken);
    }

    Ok(matched.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::hash_secret;

    fn stored(raw: &str, expires_at: DateTime<Utc>) -> SingleUseToken {
        SingleUseToken {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token_hash: hash_secret(raw).unwrap(),
            expires_at,
            consumed_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn matching_live_token_is_selected() {
        let token = stored("123456", Utc::now() + Duration::minutes(10));
        let rows = vec![token.clone()];

        let matched = select_match(&rows, "123456", Utc::now()).unwrap();
        assert_eq!(matched.id, token.id);
    }

    #[test]
    fn wrong_candidate_is_invalid() {
        let rows = vec![stored("123456", Utc::now() + Duration::minutes(10))];

        match select_match(&rows, "654321", Utc::now()) {
            Err(ApiError::InvalidToken) => {}
            other => panic!("expected InvalidToken, got {other:?}"),
        }
    }

    #[test]
    fn matching_expired_token_is_expired_not_invalid() {
        let rows = vec![stored("123456", Utc::now() - Duration::minutes(1))];

        match select_match(&rows, "123456", Utc::now()) {
            Err(ApiError::TokenExpired) => {}
            other => panic!("expected TokenExpired, got {other:?}"),
        }

        // The wrong candidate against the same expired row stays invalid:
        // expiry is only reported for a token that actually verifies.
        match select_match(&rows, "654321", Utc::now()) {
            Err(ApiError::InvalidToken) => {}
            other => panic!("expected InvalidToken, got {other:?}"),
        }
    }

    #[test]
    fn consumed_tokens_never_reach_the_scan() {
        // After a redeem, list_unconsumed filters the row out; a second
        // attempt scans an empty set and fails the same as any bad token.
        match select_match(&[], "123456", Utc::now()) {
            Err(ApiError::InvalidToken) => {}
            other => panic!("expected InvalidToken, got {other:?}"),
        }
    }

    #[test]
    fn scan_settles_on_the_verifying_row() {
        let live = Utc::now() + Duration::minutes(10);
        let rows = vec![stored("111111", live), stored("222222", live)];

        let matched = select_match(&rows, "222222", Utc::now()).unwrap();
        assert_eq!(matched.id, rows[1].id);
    }

    #[test]
    fn link_tokens_are_64_hex_chars() {
        let raw = generate_raw(TokenPurpose::EmailVerification);
        assert_eq!(raw.len(), 64);
        assert!(raw.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn link_tokens_are_unique() {
        let a = generate_raw(TokenPurpose::PasswordReset);
        let b = generate_raw(TokenPurpose::PasswordReset);
        assert_ne!(a, b);
    }

    #[test]
    fn otp_codes_are_six_digits() {
        for _ in 0..32 {
            let code = generate_raw(TokenPurpose::OtpLogin);
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn ttl_policy() {
        assert_eq!(TokenPurpose::EmailVerification.ttl(), Duration::hours(1));
        assert_eq!(TokenPurpose::PasswordReset.ttl(), Duration::hours(1));
        assert_eq!(TokenPurpose::OtpLogin.ttl(), Duration::minutes(10));
    }

    #[test]
    fn purposes_map_to_distinct_tables() {
        let tables = [
            TokenPurpose::EmailVerification.table(),
            TokenPurpose::PasswordReset.table(),
            TokenPurpose::OtpLogin.table(),
        ];
        assert_eq!(tables.len(), 3);
        assert_ne!(tables[0], tables[1]);
        assert_ne!(tables[1], tables[2]);
        assert_ne!(tables[0], tables[2]);
    }
}
