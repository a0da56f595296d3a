//! bookline-gateway server entry point.
//!
//! Starts the Axum HTTP server, optionally restoring state from
//! PostgreSQL before serving.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use bookline_gateway::api;
use bookline_gateway::app_state::AppState;
use bookline_gateway::config::BookingConfig;
use bookline_gateway::domain::{EventBus, StoreRegistry};
use bookline_gateway::notifier::{self, NotificationLog};
use bookline_gateway::persistence::PostgresPersistence;
use bookline_gateway::service::BookingService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = BookingConfig::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;
    tracing::info!(addr = %config.listen_addr, "starting bookline-gateway");

    // Build domain layer
    let registry = Arc::new(StoreRegistry::new());
    let event_bus = EventBus::new(config.event_bus_capacity);

    // Build service layer, restoring durable state when enabled
    let mut booking_service = BookingService::new(Arc::clone(&registry), event_bus.clone());
    if config.persistence_enabled {
        let persistence = PostgresPersistence::connect(&config).await?;
        persistence.run_migrations().await?;

        let entries = persistence.restore().await?;
        let restored = entries.len();
        for entry in entries {
            registry.insert(entry).await?;
        }
        tracing::info!(stores = restored, "restored state from database");

        booking_service = booking_service.with_persistence(persistence, config.event_log_enabled);
    } else {
        tracing::info!("persistence disabled, running in-memory only");
    }
    let booking_service = Arc::new(booking_service);

    // Spawn the notifier task
    let notifications = Arc::new(NotificationLog::new());
    let _notifier = notifier::spawn(&event_bus, Arc::clone(&notifications));

    // Build application state
    let app_state = AppState {
        booking_service,
        event_bus,
        notifications,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
