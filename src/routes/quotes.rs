use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::db::store::PromotionStore;
use crate::models::booking::QuoteRequest;
use crate::models::promotion::Promotion;
use crate::routes::errors::{promotion_error_response, store_error_response, ErrorResponse};
use crate::services::pricing_service::{PriceBreakdown, PricingService};
use crate::services::promotion_service::PromotionService;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub hotel_id: String,
    pub room_type: String,
    pub quote: PriceBreakdown,
    pub formatted_total: String,
    pub applied_promotion: Option<Promotion>,
}

/// Price a stay without opening a booking draft
pub async fn create_quote(
    state: web::Data<AppState>,
    body: web::Json<QuoteRequest>,
) -> impl Responder {
    let request = body.into_inner();

    let hotel = match state.hotels.find(&request.hotel_id) {
        Some(hotel) => hotel,
        None => return HttpResponse::NotFound().json(ErrorResponse::new("Hotel not found")),
    };

    let promotions = match state.store.list_promotions().await {
        Ok(all) => PromotionService::eligible_promotions(&all, &hotel.id),
        Err(err) => return store_error_response(&err),
    };

    let applied = match request.promo_code.as_deref() {
        Some(code) => match PromotionService::apply_code(&promotions, code) {
            Ok(promo) => Some(promo.clone()),
            Err(err) => return promotion_error_response(&err),
        },
        None => PromotionService::best_discount(&promotions).cloned(),
    };
    let discount_percent = applied.as_ref().map(|p| p.discount_percent).unwrap_or(0.0);

    match PricingService::quote_stay(
        hotel.price,
        &request.room_type,
        discount_percent,
        request.check_in,
        request.check_out,
        request.rooms,
    ) {
        Ok(quote) => HttpResponse::Ok().json(QuoteResponse {
            hotel_id: hotel.id.clone(),
            room_type: request.room_type,
            formatted_total: quote.formatted_total(),
            quote,
            applied_promotion: applied,
        }),
        Err(err) => HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string())),
    }
}
