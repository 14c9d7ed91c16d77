use actix_web::HttpResponse;
use serde::Serialize;
use url::form_urlencoded;

use crate::db::store::StoreError;
use crate::services::booking_flow::BookingError;
use crate::services::promotion_service::PromotionError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            redirect: None,
        }
    }
}

/// `/login?redirect=...` for a path inside the site, the query the login page reads
pub fn login_redirect(return_to: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(return_to.as_bytes()).collect();
    format!("/login?redirect={}", encoded)
}

pub fn unauthenticated(return_to: &str) -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse {
        error: "Please sign in to continue booking".to_string(),
        redirect: Some(login_redirect(return_to)),
    })
}

pub fn store_error_response(err: &StoreError) -> HttpResponse {
    match err {
        StoreError::NotFound { .. } => HttpResponse::NotFound().json(ErrorResponse::new(err.to_string())),
        _ => {
            log::error!("Store failure: {}", err);
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(err.to_string()))
        }
    }
}

pub fn promotion_error_response(err: &PromotionError) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()))
}

pub fn booking_error_response(err: &BookingError) -> HttpResponse {
    match err {
        BookingError::NotAuthenticated { return_to } => unauthenticated(return_to),
        BookingError::Store(store_err) => {
            log::error!("Could not save reservation: {}", store_err);
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(err.to_string()))
        }
        BookingError::AlreadyCompleted | BookingError::WrongStep(_) => {
            HttpResponse::Conflict().json(ErrorResponse::new(err.to_string()))
        }
        BookingError::Validation(_)
        | BookingError::Pricing(_)
        | BookingError::Promotion(_)
        | BookingError::CheckInInPast { .. }
        | BookingError::InvalidDateRange { .. } => {
            HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()))
        }
    }
}
