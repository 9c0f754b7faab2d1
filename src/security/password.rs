/// One-way hashing for passwords and single-use tokens using Argon2id.
///
/// The same primitive covers login passwords, email verification tokens,
/// password reset tokens and OTP codes. The salt is baked into the PHC
/// digest, so digests are non-deterministic and never indexable.
use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};

use crate::error::{ApiError, Result};

/// Hash a secret with a fresh random salt. The plaintext is never stored
/// or logged; a hashing failure is fatal to the calling operation.
pub fn hash_secret(secret: &str) -> Result<String> {
    let salt = SaltString::generate(rand::thread_rng());

    let digest = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|_| ApiError::Internal("failed to hash secret".to_string()))?
        .to_string();

    Ok(digest)
}

/// Verify a candidate against a stored digest.
///
/// A mismatch is an `Ok(false)`, not an error; a malformed digest is an
/// internal error since we only ever store digests we produced.
pub fn verify_secret(digest: &str, candidate: &str) -> Result<bool> {
    let parsed = PasswordHash::new(digest)
        .map_err(|_| ApiError::Internal("invalid secret digest format".to_string()))?;

    match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(_) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let digest = hash_secret("P4ss!word").unwrap();
        assert!(verify_secret(&digest, "P4ss!word").unwrap());
    }

    #[test]
    fn wrong_candidate_is_rejected() {
        let digest = hash_secret("P4ss!word").unwrap();
        assert!(!verify_secret(&digest, "other-password").unwrap());
    }

    #[test]
    fn digests_are_salted() {
        let a = hash_secret("same-secret").unwrap();
        let b = hash_secret("same-secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_digest_is_an_error() {
        assert!(verify_secret("not-a-phc-string", "anything").is_err());
    }

    #[test]
    fn works_for_token_material() {
        let raw = "a".repeat(64);
        let digest = hash_secret(&raw).unwrap();
        assert!(verify_secret(&digest, &raw).unwrap());
        assert!(!verify_secret(&digest, &"b".repeat(64)).unwrap());
    }
}
