pub mod auth;
pub mod comments;
pub mod events;
pub mod groups;
pub mod health;
pub mod likes;
pub mod oauth;
pub mod otp;
pub mod posts;
