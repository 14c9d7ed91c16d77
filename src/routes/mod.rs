pub mod admin;
pub mod auth;
pub mod bookings;
pub mod errors;
pub mod health;
pub mod hotels;
pub mod quotes;
pub mod reservations;

use actix_web::web;

/// Every route the API serves. Expects [`SessionMiddleware`](crate::middleware::auth::SessionMiddleware)
/// on the app so handlers and the admin guard can see the signed-in user.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/auth")
                        .route("/signin", web::post().to(auth::signin))
                        .route("/admin/signin", web::post().to(auth::admin_signin))
                        .route("/session", web::get().to(auth::session)),
                )
                .route("/hotels", web::get().to(hotels::get_hotels))
                .route("/hotels/{id}", web::get().to(hotels::get_hotel_by_id))
                .route("/quotes", web::post().to(quotes::create_quote))
                .service(
                    web::scope("/bookings")
                        .route("", web::post().to(bookings::start_booking))
                        .route("/{draft_id}", web::get().to(bookings::get_draft))
                        .route("/{draft_id}/stay", web::put().to(bookings::update_stay))
                        .route("/{draft_id}/contact", web::put().to(bookings::update_contact))
                        .route(
                            "/{draft_id}/promo-code",
                            web::post().to(bookings::apply_promo_code),
                        )
                        .route(
                            "/{draft_id}/continue",
                            web::post().to(bookings::continue_booking),
                        )
                        .route("/{draft_id}/back", web::post().to(bookings::back)),
                )
                .route(
                    "/reservations/{id}",
                    web::get().to(reservations::get_reservation),
                )
                .configure(admin::config),
        );
}
