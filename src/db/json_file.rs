use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::{broadcast, Mutex};

use crate::db::store::{
    usable_promotions, BookingStore, ChangeNotifier, PromotionStore, ReservationStore, StoreError,
    StoreEvent,
};
use crate::models::promotion::{Promotion, PromotionStatus};
use crate::models::reservation::{sample_reservations, Reservation, ReservationStatus};

const RESERVATIONS_FILE: &str = "reservations.json";
const PROMOTIONS_FILE: &str = "promotions.json";

/// Keeps each collection as one JSON array on disk, rewritten whole on every change.
///
/// Writers in other processes are not coordinated with; whoever writes last wins.
pub struct JsonFileStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
    notifier: Option<ChangeNotifier>,
}

impl JsonFileStore {
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        log::info!("Using JSON file store at {}", dir.display());

        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
            notifier: None,
        })
    }

    pub fn with_notifier(mut self, notifier: ChangeNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    async fn read_collection<T: DeserializeOwned>(
        &self,
        file: &str,
    ) -> Result<Option<Vec<T>>, StoreError> {
        match tokio::fs::read(self.path(file)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_collection<T: Serialize>(&self, file: &str, items: &[T]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(items)?;
        let target = self.path(file);
        let staging = target.with_extension("json.tmp");

        tokio::fs::write(&staging, bytes).await?;
        tokio::fs::rename(&staging, &target).await?;
        Ok(())
    }

    async fn reservations(&self) -> Result<Vec<Reservation>, StoreError> {
        Ok(self
            .read_collection(RESERVATIONS_FILE)
            .await?
            .unwrap_or_else(sample_reservations))
    }

    async fn promotions(&self) -> Result<Vec<Promotion>, StoreError> {
        Ok(self.read_collection(PROMOTIONS_FILE).await?.unwrap_or_default())
    }

    fn notify(&self, event: StoreEvent) {
        if let Some(notifier) = &self.notifier {
            notifier.publish(event);
        }
    }
}

#[async_trait]
impl ReservationStore for JsonFileStore {
    async fn list(&self) -> Result<Vec<Reservation>, StoreError> {
        self.reservations().await
    }

    async fn create(&self, reservation: Reservation) -> Result<(), StoreError> {
        let id = reservation.id.clone();
        {
            let _guard = self.write_lock.lock().await;
            let mut reservations = self.reservations().await?;
            reservations.push(reservation);
            self.write_collection(RESERVATIONS_FILE, &reservations).await?;
        }
        self.notify(StoreEvent::ReservationCreated { id });
        Ok(())
    }

    async fn update_status(&self, id: &str, status: ReservationStatus) -> Result<(), StoreError> {
        {
            let _guard = self.write_lock.lock().await;
            let mut reservations = self.reservations().await?;
            let reservation = reservations
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| StoreError::reservation_not_found(id))?;
            reservation.status = status;
            self.write_collection(RESERVATIONS_FILE, &reservations).await?;
        }
        self.notify(StoreEvent::ReservationUpdated { id: id.to_string() });
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        {
            let _guard = self.write_lock.lock().await;
            let mut reservations = self.reservations().await?;
            let before = reservations.len();
            reservations.retain(|r| r.id != id);
            if reservations.len() == before {
                return Err(StoreError::reservation_not_found(id));
            }
            self.write_collection(RESERVATIONS_FILE, &reservations).await?;
        }
        self.notify(StoreEvent::ReservationDeleted { id: id.to_string() });
        Ok(())
    }

    fn subscribe(&self) -> Option<broadcast::Receiver<StoreEvent>> {
        self.notifier.as_ref().map(ChangeNotifier::subscribe)
    }
}

#[async_trait]
impl PromotionStore for JsonFileStore {
    async fn list_promotions(&self) -> Result<Vec<Promotion>, StoreError> {
        Ok(usable_promotions(self.promotions().await?))
    }

    async fn create_promotion(&self, promotion: Promotion) -> Result<(), StoreError> {
        {
            let _guard = self.write_lock.lock().await;
            let mut promotions = self.promotions().await?;
            promotions.push(promotion);
            self.write_collection(PROMOTIONS_FILE, &promotions).await?;
        }
        self.notify(StoreEvent::PromotionsChanged);
        Ok(())
    }

    async fn update_promotion(&self, promotion: Promotion) -> Result<(), StoreError> {
        {
            let _guard = self.write_lock.lock().await;
            let mut promotions = self.promotions().await?;
            let slot = promotions
                .iter_mut()
                .find(|p| p.id == promotion.id)
                .ok_or_else(|| StoreError::promotion_not_found(&promotion.id))?;
            *slot = promotion;
            self.write_collection(PROMOTIONS_FILE, &promotions).await?;
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
            let _guard = self.write_lock.lock().await;
            let mut promotions = self.promotions().await?;
            let promotion = promotions
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| StoreError::promotion_not_found(id))?;
            promotion.status = status;
            self.write_collection(PROMOTIONS_FILE, &promotions).await?;
        }
        self.notify(StoreEvent::PromotionsChanged);
        Ok(())
    }

    async fn delete_promotion(&self, id: &str) -> Result<(), StoreError> {
        {
            let _guard = self.write_lock.lock().await;
            let mut promotions = self.promotions().await?;
            let before = promotions.len();
            promotions.retain(|p| p.id != id);
            if promotions.len() == before {
                return Err(StoreError::promotion_not_found(id));
            }
            self.write_collection(PROMOTIONS_FILE, &promotions).await?;
        }
        self.notify(StoreEvent::PromotionsChanged);
        Ok(())
    }
}

impl BookingStore for JsonFileStore {
    fn backend_name(&self) -> &'static str {
        "file"
    }
}
