//! HTTP handlers and route configuration for the JSON API.

pub mod auth;
pub mod contacts;
pub mod health;
pub mod posts;

use actix_web::web;

/// Configure all API routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login)),
            )
            // Post resource
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{id}/like", web::post().to(posts::like))
                    .route("/{id}/unlike", web::post().to(posts::unlike))
                    .route("/{id}/comment", web::post().to(posts::comment))
                    .route("/{id}/comments", web::get().to(posts::comments)),
            )
            // Contact resource
            .service(
                web::scope("/contacts")
                    .route("", web::post().to(contacts::submit))
                    .route("", web::get().to(contacts::list))
                    .route("/{id}/read", web::put().to(contacts::mark_read))
                    .route("/{id}", web::delete().to(contacts::delete)),
            ),
    );
}
