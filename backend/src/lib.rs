//! # Baby Tracker Backend
//!
//! Contains all non-UI logic for the baby tracker application.
//!
//! The backend follows a layered architecture:
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (services, models, chart aggregation)
//!     ↓
//! Storage Layer (document store, change feed)
//! ```
//!
//! Every store operation is scoped by the injected user identity and the
//! live-sync component keeps one baby's snapshot continuously updated
//! from the store's change feed.

pub mod domain;
pub mod io;
pub mod storage;
pub mod sync;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use log::{info, warn};
use tower_http::cors::{Any, CorsLayer};

use crate::domain::{BabyService, ChartService, EntryService, HealthMirrorService, SettingsService};
use crate::storage::traits::IdentityProvider;
use crate::storage::yaml::YamlConnection;
use crate::sync::LiveSync;

/// Main application state that holds all services.
#[derive(Clone)]
pub struct AppState {
    pub baby_service: BabyService,
    pub entry_service: EntryService,
    pub chart_service: ChartService,
    pub settings_service: SettingsService,
    pub health_mirror_service: HealthMirrorService,
    pub live_sync: Arc<LiveSync>,
}

/// Initialize the backend with all required services.
///
/// If a baby was selected in a previous session, the live snapshot is
/// pointed at it right away.
pub async fn initialize_backend(
    connection: Arc<YamlConnection>,
    identity: Arc<dyn IdentityProvider>,
) -> Result<AppState> {
    info!("Setting up domain services");
    let baby_service = BabyService::new(connection.clone(), identity.clone());
    let entry_service = EntryService::new(connection.clone(), identity.clone());
    let chart_service = ChartService::new();
    let settings_service = SettingsService::new(connection.clone(), identity.clone());
    let health_mirror_service = HealthMirrorService::new(connection.clone(), identity.clone());
    let live_sync = Arc::new(LiveSync::new(connection, identity));

    match settings_service.get_settings().await {
        Ok(result) => {
            if let Some(baby_id) = result.settings.selected_baby_id {
                info!("Resuming live sync for previously selected baby {}", baby_id);
                if let Err(e) = live_sync.start_listening(&baby_id) {
                    warn!("Could not resume live sync: {}", e);
                }
            }
        }
        Err(e) => warn!("Could not load persisted settings: {}", e),
    }

    Ok(AppState {
        baby_service,
        entry_service,
        chart_service,
        settings_service,
        health_mirror_service,
        live_sync,
    })
}

/// Create the axum router with all routes configured.
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow a local frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/babies",
            get(io::rest::baby_apis::list_babies).post(io::rest::baby_apis::create_babies),
        )
        .route(
            "/babies/:baby_id",
            get(io::rest::baby_apis::get_baby).delete(io::rest::baby_apis::delete_baby),
        )
        .route("/babies/live", get(io::rest::baby_apis::get_live_baby))
        .route(
            "/babies/:baby_id/feed-entries",
            post(io::rest::entry_apis::create_feed_entry),
        )
        .route(
            "/babies/:baby_id/feed-entries/:entry_id",
            delete(io::rest::entry_apis::delete_feed_entry),
        )
        .route(
            "/babies/:baby_id/weight-entries",
            post(io::rest::entry_apis::create_weight_entry),
        )
        .route(
            "/babies/:baby_id/weight-entries/:entry_id",
            delete(io::rest::entry_apis::delete_weight_entry),
        )
        .route(
            "/babies/:baby_id/stool-entries",
            post(io::rest::entry_apis::create_stool_entry),
        )
        .route(
            "/babies/:baby_id/stool-entries/:entry_id",
            delete(io::rest::entry_apis::delete_stool_entry),
        )
        .route(
            "/babies/:baby_id/wet-diaper-entries",
            post(io::rest::entry_apis::create_wet_diaper_entry),
        )
        .route(
            "/babies/:baby_id/wet-diaper-entries/:entry_id",
            delete(io::rest::entry_apis::delete_wet_diaper_entry),
        )
        .route(
            "/babies/:baby_id/dehydration-checks",
            post(io::rest::entry_apis::create_dehydration_check),
        )
        .route(
            "/babies/:baby_id/dehydration-checks/:entry_id",
            delete(io::rest::entry_apis::delete_dehydration_check),
        )
        .route(
            "/babies/:baby_id/charts/feeds",
            get(io::rest::chart_apis::feed_chart),
        )
        .route(
            "/babies/:baby_id/charts/stools",
            get(io::rest::chart_apis::stool_chart),
        )
        .route(
            "/babies/:baby_id/charts/wet-diapers",
            get(io::rest::chart_apis::wet_diaper_chart),
        )
        .route(
            "/babies/:baby_id/charts/weight",
            get(io::rest::chart_apis::weight_chart),
        )
        .route(
            "/babies/:baby_id/charts/dehydration",
            get(io::rest::chart_apis::dehydration_grid),
        )
        .route(
            "/settings",
            get(io::rest::settings_apis::get_settings)
                .put(io::rest::settings_apis::update_settings),
        )
        .route(
            "/health-samples",
            post(io::rest::health_apis::mirror_health_sample),
        )
        .route(
            "/health-samples/:sample_id",
            delete(io::rest::health_apis::remove_health_sample),
        );

    Router::new().nest("/api", api_routes).layer(cors).with_state(app_state)
}
