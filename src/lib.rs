// Community/events platform API: multi-strategy auth (Google, OTP,
// email/password) over a role/status-based group membership model.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;
pub mod validators;

pub use error::{ApiError, Result};

use crate::config::Config;
use crate::services::{GoogleVerifier, Mailer};

pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Config,
    pub mailer: Mailer,
    pub google: Option<GoogleVerifier>,
}
