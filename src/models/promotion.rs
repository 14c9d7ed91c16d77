use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionStatus {
    Active,
    Inactive,
    Expired,
}

impl PromotionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromotionStatus::Active => "active",
            PromotionStatus::Inactive => "inactive",
            PromotionStatus::Expired => "expired",
        }
    }
}

/// A discount campaign as the admin dashboard stores it.
///
/// An empty `hotel_ids` list means the promotion applies to every hotel.
/// Dates are informational only and do not take part in eligibility.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub discount_percent: f64,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub hotel_ids: Vec<String>,
    #[serde(default)]
    pub code: String,
    pub status: PromotionStatus,
}

impl Promotion {
    pub fn is_active(&self) -> bool {
        self.status == PromotionStatus::Active
    }

    pub fn applies_to(&self, hotel_id: &str) -> bool {
        self.hotel_ids.is_empty() || self.hotel_ids.iter().any(|id| id == hotel_id)
    }

    /// `discount_percent` is a finite value in 0..=100
    pub fn has_valid_discount(&self) -> bool {
        (0.0..=100.0).contains(&self.discount_percent)
    }
}

/// Admin payload for creating or editing a promotion.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub discount_percent: f64,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub hotel_ids: Vec<String>,
    #[serde(default)]
    pub code: String,
    pub status: Option<PromotionStatus>,
}
