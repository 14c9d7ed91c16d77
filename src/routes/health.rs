use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::env;

use crate::db::store::{BookingStore, ReservationStore};
use crate::state::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    store: ServiceStatus,
    environment: String,
    version: String,
}

#[derive(Serialize)]
struct ServiceStatus {
    backend: String,
    status: String,
    details: Option<String>,
}

pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store = match state.store.list().await {
        Ok(reservations) => ServiceStatus {
            backend: state.store.backend_name().to_string(),
            status: "ok".to_string(),
            details: Some(format!("{} reservations readable", reservations.len())),
        },
        Err(e) => {
            log::error!("Store health check failed: {}", e);

            ServiceStatus {
                backend: state.store.backend_name().to_string(),
                status: "error".to_string(),
                details: Some(e.to_string()),
            }
        }
    };

    let status = if store.status == "ok" { "ok" } else { "degraded" };

    HttpResponse::Ok().json(HealthStatus {
        status: status.to_string(),
        store,
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
