//! HTTP handlers and route configuration.

mod health;
mod posts;
mod profiles;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::get_all))
                    .route("", web::post().to(posts::create))
                    .route("/{id}", web::get().to(posts::get_by_id)),
            )
            .route("/users/{user_id}/posts", web::get().to(posts::get_by_author))
            .route(
                "/profiles/{username}",
                web::get().to(profiles::get_by_username),
            ),
    );
}
