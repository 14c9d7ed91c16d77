#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    dev::{Service, ServiceResponse},
    http::StatusCode,
    web, App,
};
use serde_json::Value;

use staybook_api::db::memory::MemoryStore;
use staybook_api::db::store::{BookingStore, ChangeNotifier};
use staybook_api::middleware::auth::{SessionMiddleware, TokenKeys};
use staybook_api::models::hotel::HotelCatalog;
use staybook_api::models::promotion::{Promotion, PromotionStatus};
use staybook_api::models::reservation::sample_reservations;
use staybook_api::models::user::{SessionUser, UserRole};
use staybook_api::routes;
use staybook_api::state::AppState;

pub const TEST_SECRET: &str = "test-secret";

pub struct TestApp {
    pub state: web::Data<AppState>,
    pub keys: web::Data<TokenKeys>,
    pub notifier: ChangeNotifier,
}

impl TestApp {
    /// Memory store seeded with the sample reservations and [`test_promotions`]
    pub fn new() -> Self {
        let notifier = ChangeNotifier::default();
        let store = MemoryStore::new()
            .with_reservations(sample_reservations())
            .with_promotions(test_promotions())
            .with_notifier(notifier.clone());
        Self::with_store(Arc::new(store), notifier)
    }

    pub fn with_store(store: Arc<dyn BookingStore>, notifier: ChangeNotifier) -> Self {
        Self {
            state: web::Data::new(AppState::new(store, HotelCatalog::default())),
            keys: web::Data::new(TokenKeys::new(TEST_SECRET, 1)),
            notifier,
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(SessionMiddleware)
            .app_data(self.state.clone())
            .app_data(self.keys.clone())
            .configure(routes::config)
    }

    pub fn bearer(&self, email: &str, role: UserRole) -> String {
        let user = SessionUser {
            name: email.split('@').next().unwrap_or_default().to_string(),
            email: email.to_string(),
            role,
        };
        format!("Bearer {}", self.keys.issue(&user).unwrap())
    }

    pub fn guest_token(&self) -> String {
        self.bearer("guest@example.com", UserRole::User)
    }

    pub fn admin_token(&self) -> String {
        self.bearer("admin@example.com", UserRole::Admin)
    }
}

/// Two site-wide promotions and one for hotel 3 only
pub fn test_promotions() -> Vec<Promotion> {
    let promo = |id: &str, name: &str, percent: f64, hotels: &[&str], code: &str| Promotion {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{}% off", percent),
        discount_percent: percent,
        start_date: None,
        end_date: None,
        hotel_ids: hotels.iter().map(|h| h.to_string()).collect(),
        code: code.to_string(),
        status: PromotionStatus::Active,
    };

    vec![
        promo("100", "Summer Sale", 20.0, &[], "SUMMER20"),
        promo("101", "Weekday Saver", 10.0, &[], "WEEKDAY10"),
        promo("102", "City Break", 30.0, &["3"], "CITY30"),
    ]
}

/// Status of a call, including errors raised by middleware before any handler runs.
pub async fn status_of<S, R, B>(app: &S, req: R) -> StatusCode
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    match app.call(req).await {
        Ok(resp) => resp.status(),
        Err(err) => err.as_response_error().status_code(),
    }
}

pub fn approx(value: &Value, expected: f64) -> bool {
    value
        .as_f64()
        .map(|actual| (actual - expected).abs() < 1e-6)
        .unwrap_or(false)
}
