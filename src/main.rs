use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use tokio::sync::broadcast::error::RecvError;

use staybook_api::config::AppConfig;
use staybook_api::db::{self, store::{ChangeNotifier, ReservationStore}};
use staybook_api::middleware::auth::{SessionMiddleware, TokenKeys};
use staybook_api::models::hotel::HotelCatalog;
use staybook_api::routes;
use staybook_api::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let config = AppConfig::from_env();

    let store = db::open_store(&config, ChangeNotifier::default())
        .await
        .map_err(std::io::Error::other)?;

    // Other tabs and dashboards re-read the store when it changes; the server only logs it
    if let Some(mut events) = store.subscribe() {
        actix_web::rt::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => log::debug!("Store changed: {:?}", event),
                    Err(RecvError::Lagged(skipped)) => {
                        log::warn!("Change listener skipped {} events", skipped)
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }

    let state = web::Data::new(AppState::new(store, HotelCatalog::default()));
    let keys = web::Data::new(TokenKeys::new(&config.jwt_secret, config.session_ttl_hours));

    log::info!("Attempting to bind to {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(SessionMiddleware)
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(keys.clone())
            .configure(routes::config)
    })
    .bind((config.host.clone(), config.port))?
    .run()
    .await
}
