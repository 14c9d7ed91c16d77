use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::services::room_pricing::RoomPricingCatalog;

/// Flat tax and fee rate applied on top of the discounted subtotal.
pub const TAX_RATE: f64 = 0.15;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("check-out must be at least one night after check-in (got {nights} nights)")]
    InvalidDateRange { nights: i64 },
    #[error("discount percent must be between 0 and 100 (got {0})")]
    InvalidDiscount(f64),
    #[error("at least one room is required (got {0})")]
    InvalidRoomCount(u32),
    #[error("base price must be a positive amount (got {0})")]
    InvalidBasePrice(f64),
}

/// Full cost of a stay. Amounts are never rounded here, only when displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub per_night: f64,
    pub discounted_per_night: f64,
    pub discount_percent: f64,
    /// Discount over the whole stay (all nights, all rooms).
    pub discount_amount: f64,
    pub nights: i64,
    pub rooms: u32,
    pub subtotal: f64,
    pub taxes: f64,
    pub total: f64,
}

impl PriceBreakdown {
    pub fn formatted_total(&self) -> String {
        format_currency(self.total)
    }
}

pub struct PricingService;

impl PricingService {
    pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
        (check_out - check_in).num_days()
    }

    /// Calculate the stay cost for `rooms` rooms of `room_type` over `nights` nights
    pub fn compute_total(
        base_price: f64,
        room_type: &str,
        discount_percent: f64,
        nights: i64,
        rooms: u32,
    ) -> Result<PriceBreakdown, PricingError> {
        if !base_price.is_finite() || base_price <= 0.0 {
            return Err(PricingError::InvalidBasePrice(base_price));
        }
        if !(0.0..=100.0).contains(&discount_percent) {
            return Err(PricingError::InvalidDiscount(discount_percent));
        }
        if nights < 1 {
            return Err(PricingError::InvalidDateRange { nights });
        }
        if rooms < 1 {
            return Err(PricingError::InvalidRoomCount(rooms));
        }

        let per_night = RoomPricingCatalog::room_price(base_price, room_type);
        let discount_per_night = per_night * discount_percent / 100.0;
        let discounted_per_night = per_night - discount_per_night;

        let units = nights as f64 * rooms as f64;
        let subtotal = discounted_per_night * units;
        let taxes = subtotal * TAX_RATE;

        Ok(PriceBreakdown {
            per_night,
            discounted_per_night,
            discount_percent,
            discount_amount: discount_per_night * units,
            nights,
            rooms,
            subtotal,
            taxes,
            total: subtotal + taxes,
        })
    }

    /// Same as [`compute_total`](Self::compute_total) with nights taken from the stay dates
    pub fn quote_stay(
        base_price: f64,
        room_type: &str,
        discount_percent: f64,
        check_in: NaiveDate,
        check_out: NaiveDate,
        rooms: u32,
    ) -> Result<PriceBreakdown, PricingError> {
        Self::compute_total(
            base_price,
            room_type,
            discount_percent,
            Self::nights_between(check_in, check_out),
            rooms,
        )
    }

    /// Whole-dollar "from" rate shown next to a hotel when a promotion runs
    pub fn teaser_rate(base_price: f64, discount_percent: f64) -> f64 {
        (base_price * (1.0 - discount_percent / 100.0)).round()
    }
}

pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}
