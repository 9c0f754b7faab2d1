/// Stateless session credentials: signed HS256 tokens carrying only the
/// subject id and email. Verifiable offline by anyone holding the secret.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

/// Primary login paths (password, OAuth, OTP) issue 7-day sessions.
pub fn session_ttl() -> Duration {
    Duration::days(7)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user id.
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn issue_token(secret: &str, user_id: Uuid, email: &str, ttl: Duration) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Rejects bad signatures and expired tokens; only `sub` and `email` are
/// trusted downstream.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    const SECRET: &str = "test-secret";

    #[test]
    fn issue_and_verify_round_trip() {
        let user_id = Uuid::new_v4();
        let token = issue_token(SECRET, user_id, "alice@x.com", session_ttl()).unwrap();

        let claims = verify_token(SECRET, &token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "alice@x.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(SECRET, Uuid::new_v4(), "a@b.co", session_ttl()).unwrap();
        assert!(verify_token("other-secret", &token).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = issue_token(SECRET, Uuid::new_v4(), "a@b.co", session_ttl()).unwrap();
        let mut tampered = token.clone();
        tampered.push('x');
        assert!(verify_token(SECRET, &tampered).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = issue_token(SECRET, Uuid::new_v4(), "a@b.co", Duration::hours(-2)).unwrap();
        match verify_token(SECRET, &token) {
            Err(ApiError::TokenExpired) => {}
            other => panic!("expected TokenExpired, got {other:?}"),
        }
    }

    #[test]
    fn session_ttl_is_seven_days() {
        let token = issue_token(SECRET, Uuid::new_v4(), "a@b.co", session_ttl()).unwrap();
        let claims = verify_token(SECRET, &token).unwrap();
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 3600);
    }
}
