use actix_web::{web, HttpResponse, Responder};

use crate::db::store::ReservationStore;
use crate::models::user::Session;
use crate::routes::errors::{store_error_response, unauthenticated, ErrorResponse};
use crate::state::AppState;

/// Confirmation lookup. Guests see their own reservations; admins see any.
pub async fn get_reservation(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();

    let user = match (&session.user, session.is_authenticated) {
        (Some(user), true) => user,
        _ => return unauthenticated(&format!("/reservations/{}", id)),
    };

    match state.store.get(&id).await {
        Ok(Some(reservation)) => {
            let owns = reservation.user_id.as_deref() == Some(user.email.as_str());
            if owns || user.is_admin() {
                HttpResponse::Ok().json(reservation)
            } else {
                HttpResponse::NotFound().json(ErrorResponse::new("Reservation not found"))
            }
        }
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse::new("Reservation not found")),
        Err(err) => store_error_response(&err),
    }
}
