pub mod json_file;
pub mod memory;
pub mod mongo;
pub mod store;

use std::sync::Arc;

use crate::config::{AppConfig, StoreBackend};
use crate::db::store::{BookingStore, ChangeNotifier, StoreError};

/// Build the configured backend, wired to `notifier` for change broadcasts.
pub async fn open_store(
    config: &AppConfig,
    notifier: ChangeNotifier,
) -> Result<Arc<dyn BookingStore>, StoreError> {
    let store: Arc<dyn BookingStore> = match config.store_backend {
        StoreBackend::Memory => Arc::new(
            memory::MemoryStore::new()
                .with_reservations(crate::models::reservation::sample_reservations())
                .with_notifier(notifier),
        ),
        StoreBackend::File => Arc::new(
            json_file::JsonFileStore::open(&config.store_path)
                .await?
                .with_notifier(notifier),
        ),
        StoreBackend::Mongo => {
            let uri = config.mongo_uri.as_deref().ok_or_else(|| {
                StoreError::Database("MONGODB_URI must be set for the mongo backend".to_string())
            })?;
            let client = mongo::create_mongo_client(uri).await?;
            Arc::new(mongo::MongoStore::new(client).with_notifier(notifier))
        }
    };

    log::info!("Store backend: {}", store.backend_name());
    Ok(store)
}
