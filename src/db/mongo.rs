use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

use crate::db::store::{
    usable_promotions, BookingStore, ChangeNotifier, PromotionStore, ReservationStore, StoreError,
    StoreEvent,
};
use crate::models::promotion::{Promotion, PromotionStatus};
use crate::models::reservation::{Reservation, ReservationStatus};

const DATABASE: &str = "StayBook";

pub async fn create_mongo_client(uri: &str) -> Result<Arc<Client>, StoreError> {
    log::info!("Connecting to MongoDB");

    let mut client_options = ClientOptions::parse(uri).await.map_err(database_error)?;

    // Set a reasonable timeout for operations
    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);

    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    let client = Client::with_options(client_options).map_err(database_error)?;

    match client.database(DATABASE).run_command(doc! {"ping": 1}).await {
        Ok(_) => log::info!("Successfully connected to MongoDB and verified with ping command"),
        Err(e) => {
            log::warn!("Connected to MongoDB but ping test failed: {}", e);
            log::warn!("Reservations may fail to save until the database is reachable");
        }
    }

    Ok(Arc::new(client))
}

fn database_error(err: mongodb::error::Error) -> StoreError {
    StoreError::Database(err.to_string())
}

/// Reservations and promotions as documents keyed by their own `id` field.
pub struct MongoStore {
    client: Arc<Client>,
    notifier: Option<ChangeNotifier>,
}

impl MongoStore {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: ChangeNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    fn reservations(&self) -> Collection<Reservation> {
        self.client.database(DATABASE).collection("Reservations")
    }

    fn promotions(&self) -> Collection<Promotion> {
        self.client.database(DATABASE).collection("Promotions")
    }

    fn notify(&self, event: StoreEvent) {
        if let Some(notifier) = &self.notifier {
            notifier.publish(event);
        }
    }
}

#[async_trait]
impl ReservationStore for MongoStore {
    async fn list(&self) -> Result<Vec<Reservation>, StoreError> {
        let cursor = self.reservations().find(doc! {}).await.map_err(database_error)?;
        cursor.try_collect().await.map_err(database_error)
    }

    async fn get(&self, id: &str) -> Result<Option<Reservation>, StoreError> {
        self.reservations()
            .find_one(doc! { "id": id })
            .await
            .map_err(database_error)
    }

    async fn create(&self, reservation: Reservation) -> Result<(), StoreError> {
        self.reservations()
            .insert_one(&reservation)
            .await
            .map_err(database_error)?;
        self.notify(StoreEvent::ReservationCreated { id: reservation.id });
        Ok(())
    }

    async fn update_status(&self, id: &str, status: ReservationStatus) -> Result<(), StoreError> {
        let result = self
            .reservations()
            .update_one(doc! { "id": id }, doc! { "$set": { "status": status.as_str() } })
            .await
            .map_err(database_error)?;

        if result.matched_count == 0 {
            return Err(StoreError::reservation_not_found(id));
        }
        self.notify(StoreEvent::ReservationUpdated { id: id.to_string() });
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let result = self
            .reservations()
            .delete_one(doc! { "id": id })
            .await
            .map_err(database_error)?;

        if result.deleted_count == 0 {
            return Err(StoreError::reservation_not_found(id));
        }
        self.notify(StoreEvent::ReservationDeleted { id: id.to_string() });
        Ok(())
    }

    fn subscribe(&self) -> Option<broadcast::Receiver<StoreEvent>> {
        self.notifier.as_ref().map(ChangeNotifier::subscribe)
    }
}

#[async_trait]
impl PromotionStore for MongoStore {
    async fn list_promotions(&self) -> Result<Vec<Promotion>, StoreError> {
        let cursor = self.promotions().find(doc! {}).await.map_err(database_error)?;
        let promotions: Vec<Promotion> = cursor.try_collect().await.map_err(database_error)?;
        Ok(usable_promotions(promotions))
    }

    async fn create_promotion(&self, promotion: Promotion) -> Result<(), StoreError> {
        self.promotions()
            .insert_one(&promotion)
            .await
            .map_err(database_error)?;
        self.notify(StoreEvent::PromotionsChanged);
        Ok(())
    }

    async fn update_promotion(&self, promotion: Promotion) -> Result<(), StoreError> {
        let result = self
            .promotions()
            .replace_one(doc! { "id": promotion.id.as_str() }, &promotion)
            .await
            .map_err(database_error)?;

        if result.matched_count == 0 {
            return Err(StoreError::promotion_not_found(&promotion.id));
        }
        self.notify(StoreEvent::PromotionsChanged);
        Ok(())
    }

    async fn update_promotion_status(
        &self,
        id: &str,
        status: PromotionStatus,
    ) -> Result<(), StoreError> {
        let result = self
            .promotions()
            .update_one(doc! { "id": id }, doc! { "$set": { "status": status.as_str() } })
            .await
            .map_err(database_error)?;

        if result.matched_count == 0 {
            return Err(StoreError::promotion_not_found(id));
        }
        self.notify(StoreEvent::PromotionsChanged);
        Ok(())
    }

    async fn delete_promotion(&self, id: &str) -> Result<(), StoreError> {
        let result = self
            .promotions()
            .delete_one(doc! { "id": id })
            .await
            .map_err(database_error)?;

        if result.deleted_count == 0 {
            return Err(StoreError::promotion_not_found(id));
        }
        self.notify(StoreEvent::PromotionsChanged);
        Ok(())
    }
}

impl BookingStore for MongoStore {
    fn backend_name(&self) -> &'static str {
        "mongo"
    }
}
