use std::sync::Arc;

use crate::db::store::BookingStore;
use crate::models::hotel::HotelCatalog;
use crate::services::draft_registry::DraftRegistry;

/// Shared by every worker through `web::Data`.
pub struct AppState {
    pub store: Arc<dyn BookingStore>,
    pub hotels: HotelCatalog,
    pub drafts: DraftRegistry,
}

impl AppState {
    pub fn new(store: Arc<dyn BookingStore>, hotels: HotelCatalog) -> Self {
        Self {
            store,
            hotels,
            drafts: DraftRegistry::new(),
        }
    }
}
