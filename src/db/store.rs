use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::models::promotion::{Promotion, PromotionStatus};
use crate::models::reservation::{Reservation, ReservationStatus};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data has an unexpected shape: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("database error: {0}")]
    Database(String),
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },
}

impl StoreError {
    pub fn reservation_not_found(id: &str) -> Self {
        StoreError::NotFound {
            kind: "reservation",
            id: id.to_string(),
        }
    }

    pub fn promotion_not_found(id: &str) -> Self {
        StoreError::NotFound {
            kind: "promotion",
            id: id.to_string(),
        }
    }
}

/// Which collection changed. Receivers re-read the collection from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    ReservationCreated { id: String },
    ReservationUpdated { id: String },
    ReservationDeleted { id: String },
    PromotionsChanged,
}

/// Best-effort fan-out of store changes to whoever is listening.
///
/// Sends never block and are dropped when nobody subscribed.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<StoreEvent>,
}

impl ChangeNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn publish(&self, event: StoreEvent) {
        // An error only means there are no receivers right now
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}

/// Drop stored promotions whose discount is out of range so a single bad
/// record can never be selected for pricing.
pub fn usable_promotions(promotions: Vec<Promotion>) -> Vec<Promotion> {
    promotions
        .into_iter()
        .filter(|promo| {
            let valid = promo.has_valid_discount();
            if !valid {
                log::warn!(
                    "Skipping stored promotion {} with discount {}",
                    promo.id,
                    promo.discount_percent
                );
            }
            valid
        })
        .collect()
}

#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Reservation>, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Reservation>, StoreError> {
        Ok(self.list().await?.into_iter().find(|r| r.id == id))
    }

    /// Append `reservation`; it must be visible to `list` once this returns.
    async fn create(&self, reservation: Reservation) -> Result<(), StoreError>;

    async fn update_status(&self, id: &str, status: ReservationStatus) -> Result<(), StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Change notifications, when the backend supports them.
    fn subscribe(&self) -> Option<broadcast::Receiver<StoreEvent>> {
        None
    }
}

#[async_trait]
pub trait PromotionStore: Send + Sync {
    async fn list_promotions(&self) -> Result<Vec<Promotion>, StoreError>;

    async fn create_promotion(&self, promotion: Promotion) -> Result<(), StoreError>;

    async fn update_promotion(&self, promotion: Promotion) -> Result<(), StoreError>;

    async fn update_promotion_status(
        &self,
        id: &str,
        status: PromotionStatus,
    ) -> Result<(), StoreError>;

    async fn delete_promotion(&self, id: &str) -> Result<(), StoreError>;
}

/// Everything the API needs from a backend.
pub trait BookingStore: ReservationStore + PromotionStore {
    fn backend_name(&self) -> &'static str;
}
