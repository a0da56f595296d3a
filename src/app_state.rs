//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::notifier::NotificationLog;
use crate::service::BookingService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Booking service for all business logic.
    pub booking_service: Arc<BookingService>,
    /// Event bus for domain events.
    pub event_bus: EventBus,
    /// Materialized notifications, fed by the notifier task.
    pub notifications: Arc<NotificationLog>,
}
