use actix_web::{http::header, web, HttpResponse, Responder};
use serde::Deserialize;

use crate::db::store::ReservationStore;
use crate::models::reservation::{Reservation, ReservationStats, ReservationStatus};
use crate::routes::errors::{store_error_response, ErrorResponse};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ReservationQuery {
    pub q: Option<String>,
    /// `all` or empty disables the filter
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: ReservationStatus,
}

fn filter_reservations(
    reservations: Vec<Reservation>,
    query: &ReservationQuery,
) -> Result<Vec<Reservation>, String> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(raw.parse::<ReservationStatus>()?),
    };
    let search = query.q.as_deref().map(str::trim).unwrap_or_default();

    Ok(reservations
        .into_iter()
        .filter(|r| search.is_empty() || r.matches_query(search))
        .filter(|r| status.map_or(true, |status| r.status == status))
        .collect())
}

pub async fn list_reservations(
    state: web::Data<AppState>,
    query: web::Query<ReservationQuery>,
) -> impl Responder {
    let reservations = match state.store.list().await {
        Ok(reservations) => reservations,
        Err(err) => return store_error_response(&err),
    };

    match filter_reservations(reservations, &query) {
        Ok(filtered) => HttpResponse::Ok().json(filtered),
        Err(message) => HttpResponse::BadRequest().json(ErrorResponse::new(message)),
    }
}

pub async fn reservation_stats(state: web::Data<AppState>) -> impl Responder {
    match state.store.list().await {
        Ok(reservations) => HttpResponse::Ok().json(ReservationStats::from_reservations(&reservations)),
        Err(err) => store_error_response(&err),
    }
}

/// Every reservation as headerless CSV, one row per line
pub async fn export_reservations(state: web::Data<AppState>) -> impl Responder {
    let reservations = match state.store.list().await {
        Ok(reservations) => reservations,
        Err(err) => return store_error_response(&err),
    };

    let body = reservations
        .iter()
        .map(Reservation::to_csv_row)
        .collect::<Vec<_>>()
        .join("\n");

    HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"reservations.csv\"",
        ))
        .body(body)
}

pub async fn update_reservation_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<StatusUpdate>,
) -> impl Responder {
    let id = path.into_inner();
    let status = body.into_inner().status;

    match state.store.update_status(&id, status).await {
        Ok(()) => {
            log::info!("Reservation {} marked {}", id, status.as_str());
            match state.store.get(&id).await {
                Ok(Some(reservation)) => HttpResponse::Ok().json(reservation),
                Ok(None) => HttpResponse::NoContent().finish(),
                Err(err) => store_error_response(&err),
            }
        }
        Err(err) => store_error_response(&err),
    }
}

pub async fn delete_reservation(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();

    match state.store.delete(&id).await {
        Ok(()) => {
            log::info!("Reservation {} deleted", id);
            HttpResponse::NoContent().finish()
        }
        Err(err) => store_error_response(&err),
    }
}
