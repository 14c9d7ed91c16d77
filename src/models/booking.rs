use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::promotion::Promotion;
use crate::services::pricing_service::PriceBreakdown;

pub const MIN_GUESTS: u32 = 1;
pub const MAX_GUESTS: u32 = 8;
pub const MIN_ROOMS: u32 = 1;
pub const MAX_ROOMS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingStep {
    CollectingStayDetails,
    CollectingGuestInfo,
    Completed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub special_requests: String,
}

impl ContactInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn has_required_fields(&self) -> bool {
        !self.first_name.is_empty() && !self.last_name.is_empty() && !self.email.is_empty()
    }
}

/// In-progress booking owned by a single flow. Never persisted as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub hotel_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub rooms: u32,
    pub selected_room_type: String,
    pub contact: ContactInfo,
    pub applied_promotion_id: Option<String>,
    pub step: BookingStep,
    /// Earliest selectable check-in, the day the draft was opened.
    #[serde(skip)]
    pub opened_on: NaiveDate,
}

impl BookingDraft {
    pub fn new(hotel_id: &str, today: NaiveDate, preselected_room: Option<&str>) -> Self {
        Self {
            hotel_id: hotel_id.to_string(),
            check_in: today,
            check_out: today.checked_add_days(Days::new(1)).unwrap_or(today),
            guests: 2,
            rooms: 1,
            selected_room_type: preselected_room.unwrap_or_default().to_string(),
            contact: ContactInfo::default(),
            applied_promotion_id: None,
            step: BookingStep::CollectingStayDetails,
            opened_on: today,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartBookingInput {
    pub hotel_id: String,
    pub room: Option<String>,
}

/// Partial update for the first wizard step; absent fields stay as they are.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayDetailsInput {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: Option<u32>,
    pub rooms: Option<u32>,
    pub room_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PromoCodeInput {
    pub code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub hotel_id: String,
    #[serde(default)]
    pub room_type: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default = "default_rooms")]
    pub rooms: u32,
    pub promo_code: Option<String>,
}

fn default_rooms() -> u32 {
    1
}

/// What the booking page renders: the draft, its price and the promotion in force.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
    pub draft_id: String,
    pub hotel_name: String,
    pub draft: BookingDraft,
    pub nights: i64,
    pub quote: Option<PriceBreakdown>,
    pub applied_promotion: Option<Promotion>,
    pub available_promotions: Vec<Promotion>,
    pub reservation_id: Option<String>,
}
