/// Google sign-in: verify the ID token against Google's tokeninfo
/// endpoint, then resolve the asserted profile to a local user.
use serde::Deserialize;
use sqlx::PgPool;

use crate::db::user_repo;
use crate::error::{ApiError, Result};
use crate::models::User;
use crate::validators::normalize_email;

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

#[derive(Clone)]
pub struct GoogleVerifier {
    client_id: String,
    http: reqwest::Client,
}

/// Claims surfaced by the tokeninfo endpoint for an ID token carrying the
/// email and profile scopes.
#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    sub: String,
    email: Option<String>,
    email_verified: Option<String>,
    name: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
    picture: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GoogleProfile {
    pub external_id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

impl GoogleVerifier {
    pub fn new(client_id: String) -> Self {
        GoogleVerifier {
            client_id,
            http: reqwest::Client::new(),
        }
    }

    /// Validate the ID token server-side and extract the asserted profile.
    /// The audience must match our client id.
    pub async fn verify_id_token(&self, id_token: &str) -> Result<GoogleProfile> {
        let response = self
            .http
            .get(TOKENINFO_URL)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| ApiError::Internal(format!("tokeninfo request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ApiError::InvalidCredentials);
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|e| ApiError::Internal(format!("tokeninfo parse failed: {e}")))?;

        if info.aud != self.client_id {
            return Err(ApiError::InvalidCredentials);
        }

        let email = match info.email {
            Some(email) => email,
            None => return Err(ApiError::InvalidCredentials),
        };

        if info.email_verified.as_deref() != Some("true") {
            return Err(ApiError::InvalidCredentials);
        }

        let name = display_name(
            info.name.as_deref(),
            info.given_name.as_deref(),
            info.family_name.as_deref(),
            &email,
        );

        Ok(GoogleProfile {
            external_id: info.sub,
            email,
            name,
            picture: info.picture,
        })
    }
}

/// Fallback chain for the display name: full name, then given+family,
/// then the email itself.
fn display_name(
    name: Option<&str>,
    given: Option<&str>,
    family: Option<&str>,
    email: &str,
) -> String {
    if let Some(name) = name {
        if !name.trim().is_empty() {
            return name.to_string();
        }
    }

    let combined = format!("{} {}", given.unwrap_or(""), family.unwrap_or(""));
    let combined = combined.trim();
    if !combined.is_empty() {
        return combined.to_string();
    }

    email.to_string()
}

/// Map the asserted identity to a local user, creating it if absent.
///
/// Existing accounts get their name/picture overwritten on every login;
/// the external IdP is trusted as the source of truth for profile fields.
pub async fn resolve_profile(pool: &PgPool, profile: &GoogleProfile) -> Result<User> {
    let email = normalize_email(&profile.email);

    match user_repo::find_by_email(pool, &email).await? {
        Some(user) => {
            let user = user_repo::update_profile(
                pool,
                user.id,
                Some(&profile.name),
                profile.picture.as_deref(),
            )
            .await?;
            Ok(user)
        }
        None => {
            let user = user_repo::create_oauth_user(
                pool,
                &email,
                Some(&profile.name),
                profile.picture.as_deref(),
                &profile.external_id,
            )
            .await?;
            tracing::info!(user_id = %user.id, "user provisioned from google profile");
            Ok(user)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_full_name() {
        assert_eq!(
            display_name(Some("Ada Lovelace"), Some("Ada"), Some("Lovelace"), "a@b.co"),
            "Ada Lovelace"
        );
    }

    #[test]
    fn display_name_combines_given_and_family() {
        assert_eq!(
            display_name(None, Some("Ada"), Some("Lovelace"), "a@b.co"),
            "Ada Lovelace"
        );
        assert_eq!(display_name(None, Some("Ada"), None, "a@b.co"), "Ada");
    }

    #[test]
    fn display_name_falls_back_to_email() {
        assert_eq!(display_name(None, None, None, "a@b.co"), "a@b.co");
        assert_eq!(display_name(Some("  "), None, None, "a@b.co"), "a@b.co");
    }
}
