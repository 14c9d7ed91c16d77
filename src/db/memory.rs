use std::sync::RwLock;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::db::store::{
    usable_promotions, BookingStore, ChangeNotifier, PromotionStore, ReservationStore, StoreError,
    StoreEvent,
};
use crate::models::promotion::{Promotion, PromotionStatus};
use crate::models::reservation::{Reservation, ReservationStatus};

/// Process-local store. Without a notifier it never broadcasts.
#[derive(Default)]
pub struct MemoryStore {
    reservations: RwLock<Vec<Reservation>>,
    promotions: RwLock<Vec<Promotion>>,
    notifier: Option<ChangeNotifier>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notifier(mut self, notifier: ChangeNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_reservations(self, reservations: Vec<Reservation>) -> Self {
        *self.reservations.write().unwrap_or_else(|e| e.into_inner()) = reservations;
        self
    }

    pub fn with_promotions(self, promotions: Vec<Promotion>) -> Self {
        *self.promotions.write().unwrap_or_else(|e| e.into_inner()) = promotions;
        self
    }

    fn notify(&self, event: StoreEvent) {
        if let Some(notifier) = &self.notifier {
            notifier.publish(event);
        }
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Reservation>, StoreError> {
        Ok(self.reservations.read().unwrap_or_else(|e| e.into_inner()).clone())
    }

    async fn create(&self, reservation: Reservation) -> Result<(), StoreError> {
        let id = reservation.id.clone();
        self.reservations
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(reservation);
        self.notify(StoreEvent::ReservationCreated { id });
        Ok(())
    }

    async fn update_status(&self, id: &str, status: ReservationStatus) -> Result<(), StoreError> {
        {
            let mut reservations = self.reservations.write().unwrap_or_else(|e| e.into_inner());
            let reservation = reservations
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| StoreError::reservation_not_found(id))?;
            reservation.status = status;
        }
        self.notify(StoreEvent::ReservationUpdated { id: id.to_string() });
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        {
            let mut reservations = self.reservations.write().unwrap_or_else(|e| e.into_inner());
            let before = reservations.len();
            reservations.retain(|r| r.id != id);
            if reservations.len() == before {
                return Err(StoreError::reservation_not_found(id));
            }
        }
        self.notify(StoreEvent::ReservationDeleted { id: id.to_string() });
        Ok(())
    }

    fn subscribe(&self) -> Option<broadcast::Receiver<StoreEvent>> {
        self.notifier.as_ref().map(ChangeNotifier::subscribe)
    }
}

#[async_trait]
impl PromotionStore for MemoryStore {
    async fn list_promotions(&self) -> Result<Vec<Promotion>, StoreError> {
        let promotions = self.promotions.read().unwrap_or_else(|e| e.into_inner()).clone();
        Ok(usable_promotions(promotions))
    }

    async fn create_promotion(&self, promotion: Promotion) -> Result<(), StoreError> {
        self.promotions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(promotion);
        self.notify(StoreEvent::PromotionsChanged);
        Ok(())
    }

    async fn update_promotion(&self, promotion: Promotion) -> Result<(), StoreError> {
        {
            let mut promotions = self.promotions.write().unwrap_or_else(|e| e.into_inner());
            let slot = promotions
                .iter_mut()
                .find(|p| p.id == promotion.id)
                .ok_or_else(|| StoreError::promotion_not_found(&promotion.id))?;
            *slot = promotion;
        }
        self.notify(StoreEvent::PromotionsChanged);
        Ok(())
    }

    async fn update_promotion_status(
        &self,
        id: &str,
        status: PromotionStatus,
    ) -> Result<(), StoreError> {
        {
            let mut promotions = self.promotions.write().unwrap_or_else(|e| e.into_inner());
            let promotion = promotions
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| StoreError::promotion_not_found(id))?;
            promotion.status = status;
        }
        self.notify(StoreEvent::PromotionsChanged);
        Ok(())
    }

    async fn delete_promotion(&self, id: &str) -> Result<(), StoreError> {
        {
            let mut promotions = self.promotions.write().unwrap_or_else(|e| e.into_inner());
            let before = promotions.len();
            promotions.retain(|p| p.id != id);
            if promotions.len() == before {
                return Err(StoreError::promotion_not_found(id));
            }
        }
        self.notify(StoreEvent::PromotionsChanged);
        Ok(())
    }
}

impl BookingStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
