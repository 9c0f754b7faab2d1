/// Route wiring. Authentication is enforced per handler via the
/// `AuthUser` extractor rather than a scope-wide guard.
use actix_web::web;

use crate::handlers::{auth, comments, events, groups, health, likes, oauth, otp, posts};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login))
                .route("/verify-email", web::post().to(auth::verify_email))
                .route("/resend-verification", web::post().to(auth::resend_verification))
                .route("/password/forgot", web::post().to(auth::forgot_password))
                .route("/password/reset", web::post().to(auth::reset_password))
                .route("/google", web::post().to(oauth::google_login))
                .route("/profile", web::get().to(auth::profile))
                .route("/email-otp", web::post().to(otp::request_otp))
                .route("/email-otp/verify", web::post().to(otp::verify_otp)),
        )
        .service(
            web::scope("/groups")
                .route("", web::post().to(groups::create))
                .route("", web::get().to(groups::find_all))
                .route("/{id}", web::get().to(groups::find_one))
                .route("/{id}/join", web::post().to(groups::join))
                .route("/{id}/members", web::get().to(groups::list_members))
                .route(
                    "/{id}/members/{user_id}",
                    web::patch().to(groups::update_member),
                )
                .route("/{id}/posts", web::post().to(posts::create))
                .route("/{id}/posts", web::get().to(posts::find_by_group))
                .route("/{id}/events", web::post().to(events::create))
                .route("/{id}/events", web::get().to(events::find_by_group)),
        )
        .service(
            web::scope("/posts")
                .route("/{id}/comments", web::post().to(comments::create))
                .route("/{id}/comments", web::get().to(comments::find_by_post))
                .route("/{id}/like", web::post().to(likes::like))
                .route("/{id}/like", web::delete().to(likes::unlike))
                .route("/{id}/like", web::get().to(likes::count)),
        )
        .service(
            web::scope("/events")
                .route("", web::get().to(events::find_all_public))
                .route("/{id}/rsvps", web::get().to(events::list_rsvps))
                .route("/{id}/rsvp", web::post().to(events::rsvp))
                .route("/{id}/rsvp", web::delete().to(events::remove_rsvp)),
        );
}
