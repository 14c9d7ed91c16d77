use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::db::store::PromotionStore;
use crate::models::promotion::{PromotionInput, PromotionStatus};
use crate::routes::errors::{promotion_error_response, store_error_response, ErrorResponse};
use crate::services::promotion_service::PromotionService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PromotionQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PromotionStatusUpdate {
    pub status: PromotionStatus,
}

pub async fn list_promotions(
    state: web::Data<AppState>,
    query: web::Query<PromotionQuery>,
) -> impl Responder {
    match state.store.list_promotions().await {
        Ok(promotions) => {
            let search = query.q.as_deref().map(str::trim).unwrap_or_default();
            if search.is_empty() {
                HttpResponse::Ok().json(promotions)
            } else {
                HttpResponse::Ok().json(PromotionService::search_promotions(&promotions, search))
            }
        }
        Err(err) => store_error_response(&err),
    }
}

pub async fn create_promotion(
    state: web::Data<AppState>,
    body: web::Json<PromotionInput>,
) -> impl Responder {
    let promotion = match PromotionService::new_promotion(body.into_inner()) {
        Ok(promotion) => promotion,
        Err(err) => return promotion_error_response(&err),
    };

    match state.store.create_promotion(promotion.clone()).await {
        Ok(()) => {
            log::info!("Created promotion {} ({})", promotion.name, promotion.code);
            HttpResponse::Created().json(promotion)
        }
        Err(err) => store_error_response(&err),
    }
}

pub async fn update_promotion(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PromotionInput>,
) -> impl Responder {
    let id = path.into_inner();

    let existing = match state.store.list_promotions().await {
        Ok(promotions) => promotions.into_iter().find(|p| p.id == id),
        Err(err) => return store_error_response(&err),
    };
    let existing = match existing {
        Some(promotion) => promotion,
        None => return HttpResponse::NotFound().json(ErrorResponse::new("Promotion not found")),
    };

    let updated = match PromotionService::edit_promotion(&existing, body.into_inner()) {
        Ok(promotion) => promotion,
        Err(err) => return promotion_error_response(&err),
    };

    match state.store.update_promotion(updated.clone()).await {
        Ok(()) => HttpResponse::Ok().json(updated),
        Err(err) => store_error_response(&err),
    }
}

pub async fn update_promotion_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PromotionStatusUpdate>,
) -> impl Responder {
    let id = path.into_inner();
    let status = body.into_inner().status;

    match state.store.update_promotion_status(&id, status).await {
        Ok(()) => {
            log::info!("Promotion {} marked {}", id, status.as_str());
            HttpResponse::NoContent().finish()
        }
        Err(err) => store_error_response(&err),
    }
}

pub async fn delete_promotion(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();

    match state.store.delete_promotion(&id).await {
        Ok(()) => {
            log::info!("Promotion {} deleted", id);
            HttpResponse::NoContent().finish()
        }
        Err(err) => store_error_response(&err),
    }
}
