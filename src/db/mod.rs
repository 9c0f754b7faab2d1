pub mod comment_repo;
pub mod event_repo;
pub mod group_repo;
pub mod like_repo;
pub mod member_repo;
pub mod post_repo;
pub mod token_repo;
pub mod user_repo;
