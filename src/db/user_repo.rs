use crate::error::{ApiError, Result};
use crate::models::User;
use sqlx::PgPool;
use uuid::Uuid;

/// Case-insensitive lookup; emails are stored as entered but matched lowered.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT * FROM users WHERE lower(email) = lower($1)
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT * FROM users WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Insert a locally-registered user in `pending_verification` state.
///
/// The unique index on lower(email) is the authority for duplicate
/// registrations; its violation maps to `EmailTaken`.
pub async fn create_local_user(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
    document_id: Option<&str>,
) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, password_hash, document_id, status)
        VALUES ($1, $2, $3, 'pending_verification')
        RETURNING *
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(document_id)
    .fetch_one(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => ApiError::EmailTaken,
        _ => ApiError::Database(e),
    })
}

/// Insert a user resolved from a Google profile. The IdP guarantees the
/// email, so the account is born active and verified.
pub async fn create_oauth_user(
    pool: &PgPool,
    email: &str,
    name: Option<&str>,
    picture: Option<&str>,
    google_id: &str,
) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, name, picture, google_id, status, email_verified_at)
        VALUES ($1, $2, $3, $4, 'active', now())
        RETURNING *
        "#,
    )
    .bind(email)
    .bind(name)
    .bind(picture)
    .bind(google_id)
    .fetch_one(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => ApiError::EmailTaken,
        _ => ApiError::Database(e),
    })
}

/// Overwrite name/picture from the external IdP. Deliberate policy: the
/// external assertion wins on every login.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    name: Option<&str>,
    picture: Option<&str>,
) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET name = $1, picture = $2, updated_at = now()
        WHERE id = $3
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(picture)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn mark_email_verified(pool: &PgPool, user_id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE users SET email_verified_at = now(), status = 'active', updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn update_password(pool: &PgPool, user_id: Uuid, password_hash: &str) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE users SET password_hash = $1, updated_at = now()
        WHERE id = $2
        "#,
    )
    .bind(password_hash)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}
