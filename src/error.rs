use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Unknown email or wrong password. The two causes are deliberately
    /// indistinguishable to the caller.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email address has not been verified")]
    EmailNotVerified,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Not an active member of this group")]
    NotAMember,

    #[error("Insufficient permissions to manage members")]
    InsufficientPermissions,

    #[error("The group owner cannot be modified")]
    CannotModifyOwner,

    #[error("This group can only be joined by invitation")]
    InviteOnly,

    #[error("Event capacity reached")]
    CapacityReached,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Email delivery failed: {0}")]
    Email(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::EmailNotVerified => "EMAIL_NOT_VERIFIED",
            ApiError::EmailTaken => "EMAIL_TAKEN",
            ApiError::PasswordMismatch => "PASSWORD_MISMATCH",
            ApiError::InvalidToken => "INVALID_TOKEN",
            ApiError::TokenExpired => "TOKEN_EXPIRED",
            ApiError::NotAMember => "NOT_A_MEMBER",
            ApiError::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            ApiError::CannotModifyOwner => "CANNOT_MODIFY_OWNER",
            ApiError::InviteOnly => "INVITE_ONLY",
            ApiError::CapacityReached => "CAPACITY_REACHED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Email(_) => "EMAIL_DELIVERY_ERROR",
            ApiError::Database(_) => "DATABASE_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::EmailNotVerified
            | ApiError::NotAMember
            | ApiError::InsufficientPermissions
            | ApiError::CannotModifyOwner
            | ApiError::InviteOnly => StatusCode::FORBIDDEN,
            ApiError::EmailTaken | ApiError::CapacityReached => StatusCode::CONFLICT,
            ApiError::PasswordMismatch
            | ApiError::InvalidToken
            | ApiError::TokenExpired
            | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Email(_) | ApiError::Database(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Store and delivery failures are logged server-side; the body keeps
        // the generic message to avoid leaking internals.
        let message = match self {
            ApiError::Database(e) => {
                tracing::error!("database error: {e}");
                "Internal server error".to_string()
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.kind(),
            message,
        })
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => ApiError::TokenExpired,
            _ => ApiError::InvalidToken,
        }
    }
}

impl From<lettre::error::Error> for ApiError {
    fn from(err: lettre::error::Error) -> Self {
        ApiError::Email(err.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for ApiError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        ApiError::Email(err.to_string())
    }
}
