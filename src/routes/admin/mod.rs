pub mod promotions;
pub mod reservations;

use actix_web::web;

use crate::middleware::role_auth::RequireRole;
use crate::models::user::UserRole;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(RequireRole::new(UserRole::Admin))
            .route("/reservations", web::get().to(reservations::list_reservations))
            .route("/reservations/stats", web::get().to(reservations::reservation_stats))
            .route("/reservations/export", web::get().to(reservations::export_reservations))
            .route(
                "/reservations/{id}/status",
                web::put().to(reservations::update_reservation_status),
            )
            .route("/reservations/{id}", web::delete().to(reservations::delete_reservation))
            .route("/promotions", web::get().to(promotions::list_promotions))
            .route("/promotions", web::post().to(promotions::create_promotion))
            .route("/promotions/{id}", web::put().to(promotions::update_promotion))
            .route("/promotions/{id}", web::delete().to(promotions::delete_promotion))
            .route(
                "/promotions/{id}/status",
                web::put().to(promotions::update_promotion_status),
            ),
    );
}
