pub mod jwt;
pub mod password;

pub use jwt::{issue_token, session_ttl, verify_token, Claims};
pub use password::{hash_secret, verify_secret};
