use chrono::Utc;
use rand::Rng;
use thiserror::Error;

use crate::models::promotion::{Promotion, PromotionInput, PromotionStatus};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromotionError {
    #[error("please enter a promotion code")]
    EmptyCode,
    #[error("the promotion code you entered is invalid or expired")]
    InvalidCode,
    #[error("discount percent must be between 0 and 100")]
    InvalidDiscount,
    #[error("promotion name is required")]
    MissingName,
}

pub struct PromotionService;

impl PromotionService {
    /// Active promotions that target `hotel_id` or every hotel, in input order
    pub fn eligible_promotions(all: &[Promotion], hotel_id: &str) -> Vec<Promotion> {
        all.iter()
            .filter(|promo| promo.is_active() && promo.applies_to(hotel_id))
            .cloned()
            .collect()
    }

    /// Highest discount wins; the earliest promotion keeps a tie.
    pub fn best_discount(eligible: &[Promotion]) -> Option<&Promotion> {
        eligible.iter().fold(None, |best: Option<&Promotion>, current| match best {
            Some(best) if current.discount_percent <= best.discount_percent => Some(best),
            _ => Some(current),
        })
    }

    /// Find the promotion whose code matches `code`, ignoring case and surrounding blanks
    pub fn apply_code<'a>(
        eligible: &'a [Promotion],
        code: &str,
    ) -> Result<&'a Promotion, PromotionError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(PromotionError::EmptyCode);
        }

        let code = code.to_lowercase();
        eligible
            .iter()
            .find(|promo| promo.code.to_lowercase() == code)
            .ok_or(PromotionError::InvalidCode)
    }

    /// Admin search over name, description and code
    pub fn search_promotions(all: &[Promotion], query: &str) -> Vec<Promotion> {
        let query = query.to_lowercase();
        all.iter()
            .filter(|promo| {
                promo.name.to_lowercase().contains(&query)
                    || promo.description.to_lowercase().contains(&query)
                    || promo.code.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    /// Build a new promotion from admin input. New promotions always start active.
    pub fn new_promotion(input: PromotionInput) -> Result<Promotion, PromotionError> {
        Self::validate(&input)?;

        let code = if input.code.trim().is_empty() {
            format!("PROMO{}", rand::thread_rng().gen_range(0..10000))
        } else {
            input.code.trim().to_string()
        };

        Ok(Promotion {
            id: Utc::now().timestamp_millis().to_string(),
            name: input.name,
            description: input.description,
            discount_percent: input.discount_percent,
            start_date: input.start_date,
            end_date: input.end_date,
            hotel_ids: input.hotel_ids,
            code,
            status: PromotionStatus::Active,
        })
    }

    /// Replace the editable fields of `existing`, keeping its id
    pub fn edit_promotion(
        existing: &Promotion,
        input: PromotionInput,
    ) -> Result<Promotion, PromotionError> {
        Self::validate(&input)?;

        Ok(Promotion {
            id: existing.id.clone(),
            name: input.name,
            description: input.description,
            discount_percent: input.discount_percent,
            start_date: input.start_date,
            end_date: input.end_date,
            hotel_ids: input.hotel_ids,
            code: input.code.trim().to_string(),
            status: input.status.unwrap_or(existing.status),
        })
    }

    fn validate(input: &PromotionInput) -> Result<(), PromotionError> {
        if input.name.trim().is_empty() {
            return Err(PromotionError::MissingName);
        }
        if !(0.0..=100.0).contains(&input.discount_percent) {
            return Err(PromotionError::InvalidDiscount);
        }
        Ok(())
    }
}
