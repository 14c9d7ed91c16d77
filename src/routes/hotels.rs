use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::db::store::PromotionStore;
use crate::models::hotel::Hotel;
use crate::models::promotion::Promotion;
use crate::routes::errors::ErrorResponse;
use crate::services::pricing_service::{PricingService, TAX_RATE};
use crate::services::promotion_service::PromotionService;
use crate::services::room_pricing::RoomPricingCatalog;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelListing {
    #[serde(flatten)]
    pub hotel: Hotel,
    pub discount_percent: f64,
    pub discounted_price: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPrice {
    pub room_type: String,
    pub price_per_night: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelDetails {
    #[serde(flatten)]
    pub hotel: Hotel,
    pub promotions: Vec<Promotion>,
    pub discount_percent: f64,
    pub discounted_price: f64,
    pub estimated_taxes: f64,
    pub room_prices: Vec<RoomPrice>,
}

/// Promotions are a nice-to-have on browse pages; a failing store shows plain prices.
async fn load_promotions(state: &AppState) -> Vec<Promotion> {
    match state.store.list_promotions().await {
        Ok(promotions) => promotions,
        Err(err) => {
            log::error!("Error retrieving promotions: {}", err);
            Vec::new()
        }
    }
}

fn best_percent(promotions: &[Promotion], hotel_id: &str) -> f64 {
    let eligible = PromotionService::eligible_promotions(promotions, hotel_id);
    PromotionService::best_discount(&eligible)
        .map(|promo| promo.discount_percent)
        .unwrap_or(0.0)
}

pub async fn get_hotels(state: web::Data<AppState>) -> impl Responder {
    let promotions = load_promotions(&state).await;

    let listings: Vec<HotelListing> = state
        .hotels
        .all()
        .iter()
        .map(|hotel| {
            let discount_percent = best_percent(&promotions, &hotel.id);
            HotelListing {
                hotel: hotel.clone(),
                discount_percent,
                discounted_price: PricingService::teaser_rate(hotel.price, discount_percent),
            }
        })
        .collect();

    HttpResponse::Ok().json(listings)
}

pub async fn get_hotel_by_id(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let hotel = match state.hotels.find(&id) {
        Some(hotel) => hotel.clone(),
        None => return HttpResponse::NotFound().json(ErrorResponse::new("Hotel not found")),
    };

    let promotions = PromotionService::eligible_promotions(&load_promotions(&state).await, &id);
    let discount_percent = PromotionService::best_discount(&promotions)
        .map(|promo| promo.discount_percent)
        .unwrap_or(0.0);
    let discounted_price = PricingService::teaser_rate(hotel.price, discount_percent);

    let room_prices = hotel
        .rooms
        .iter()
        .map(|room| RoomPrice {
            room_type: room.clone(),
            price_per_night: RoomPricingCatalog::room_price(hotel.price, room),
        })
        .collect();

    HttpResponse::Ok().json(HotelDetails {
        discount_percent,
        discounted_price,
        estimated_taxes: (discounted_price * TAX_RATE).round(),
        room_prices,
        promotions,
        hotel,
    })
}
