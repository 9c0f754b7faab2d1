pub mod comments;
pub mod events;
pub mod groups;
pub mod likes;
pub mod local_auth;
pub mod mailer;
pub mod membership;
pub mod oauth;
pub mod otp;
pub mod posts;
pub mod tokens;

pub use mailer::Mailer;
pub use oauth::GoogleVerifier;
