// src/application/state.rs
//
// Composition root. Wires pool → repositories → services → event handlers.

use log::info;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::{create_connection_pool, get_connection, initialize_database, ConnectionPool};
use crate::error::AppResult;
use crate::events::{register_review_notification_handlers, EventBus, LogReviewNotifier};
use crate::repositories::{
    ResaleListingRepository, ReturnRepository, SqliteResaleListingRepository,
    SqliteReturnRepository,
};
use crate::services::{AnalyticsService, DecisionEngine, ResaleService, ReturnService};

/// Shared application state.
/// All fields are Arc-wrapped for thread-safe sharing across commands.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub engine: DecisionEngine,
    pub return_service: Arc<ReturnService>,
    pub resale_service: Arc<ResaleService>,
    pub analytics_service: Arc<AnalyticsService>,
}

impl AppState {
    /// Open (and migrate) the configured database, then build the services
    pub fn initialize(config: &AppConfig) -> AppResult<Self> {
        let db_path = config.resolved_database_path()?;
        info!("Opening database at {}", db_path.display());

        let pool = Arc::new(create_connection_pool(&db_path, config.pool_max_size)?);
        Self::from_pool(pool)
    }

    pub fn from_pool(pool: Arc<ConnectionPool>) -> AppResult<Self> {
        // Schema is idempotent
        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
        }

        let event_bus = Arc::new(EventBus::new());
        register_review_notification_handlers(&event_bus, Arc::new(LogReviewNotifier));

        let return_repo: Arc<dyn ReturnRepository> =
            Arc::new(SqliteReturnRepository::new(pool.clone()));
        let listing_repo: Arc<dyn ResaleListingRepository> =
            Arc::new(SqliteResaleListingRepository::new(pool));

        let engine = DecisionEngine::default();

        let return_service = Arc::new(ReturnService::new(
            return_repo.clone(),
            listing_repo.clone(),
            engine.clone(),
            event_bus.clone(),
        ));
        let resale_service = Arc::new(ResaleService::new(listing_repo.clone(), event_bus.clone()));
        let analytics_service = Arc::new(AnalyticsService::new(return_repo, listing_repo));

        Ok(Self {
            event_bus,
            engine,
            return_service,
            resale_service,
            analytics_service,
        })
    }
}
