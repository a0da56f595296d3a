//! Notification fan-out driven by domain events.
//!
//! A background task subscribes to the [`EventBus`] and materializes a
//! [`Notification`] for each event it cares about. Side effects are thus
//! decoupled from the write path: the booking service publishes, the
//! notifier consumes, and nothing happens implicitly on model writes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::sync::broadcast::error::RecvError;

use crate::domain::{Actor, BookingEvent, EventBus, Role, StoreId};

/// Broad grouping for notification listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    /// Appointment lifecycle notifications.
    Appointment,
    /// Store and schedule administration notifications.
    System,
}

/// A materialized notification for store personnel.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    /// Notification identifier (UUID v4).
    pub id: uuid::Uuid,
    /// Store this notification belongs to.
    pub store_id: StoreId,
    /// Short headline.
    pub title: String,
    /// Human-readable body.
    pub message: String,
    /// Grouping category.
    pub category: NotificationCategory,
    /// Read marker; new notifications start unread.
    pub is_read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// In-memory, append-only notification store.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: RwLock<Vec<Notification>>,
}

impl NotificationLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a notification.
    pub async fn push(&self, notification: Notification) {
        self.entries.write().await.push(notification);
    }

    /// Notifications visible to the actor, newest first. Super-admins see
    /// every store; managers and staff see their own; clients see none.
    pub async fn visible_to(&self, actor: &Actor) -> Vec<Notification> {
        let entries = self.entries.read().await;
        let mut visible: Vec<Notification> = entries
            .iter()
            .filter(|n| match actor.role {
                Role::SuperAdmin => true,
                Role::StoreManager | Role::Staff => actor.store_id == Some(n.store_id),
                Role::Client => false,
            })
            .cloned()
            .collect();
        visible.reverse();
        visible
    }

    /// Total number of notifications in the log.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns `true` if the log contains no notifications.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Maps a domain event to the notification it should produce, if any.
#[must_use]
pub fn notification_for(event: &BookingEvent) -> Option<Notification> {
    match event {
        BookingEvent::AppointmentBooked {
            store_id,
            client_name,
            date,
            start_time,
            serial_no,
            ..
        } => Some(Notification {
            id: uuid::Uuid::new_v4(),
            store_id: *store_id,
            title: "New appointment".to_string(),
            message: format!(
                "{client_name} booked slot #{serial_no} on {date} at {start_time}"
            ),
            category: NotificationCategory::Appointment,
            is_read: false,
            created_at: Utc::now(),
        }),
        BookingEvent::ScheduleUpdated {
            store_id,
            day,
            is_open,
            ..
        } => Some(Notification {
            id: uuid::Uuid::new_v4(),
            store_id: *store_id,
            title: "Schedule updated".to_string(),
            message: format!(
                "weekday {day} is now {}",
                if *is_open { "open" } else { "closed" }
            ),
            category: NotificationCategory::System,
            is_read: false,
            created_at: Utc::now(),
        }),
        BookingEvent::StoreCreated { .. } => None,
    }
}

/// Spawns the notifier task: consumes the bus until it closes, appending
/// a notification for each relevant event. Lagged receivers skip dropped
/// events and keep going.
pub fn spawn(event_bus: &EventBus, log: Arc<NotificationLog>) -> tokio::task::JoinHandle<()> {
    let mut rx = event_bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Some(notification) = notification_for(&event) {
                        tracing::debug!(
                            store_id = %notification.store_id,
                            title = %notification.title,
                            "notification recorded"
                        );
                        log.push(notification).await;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "notifier lagged behind the event bus");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn booked_event(store_id: StoreId) -> BookingEvent {
        BookingEvent::AppointmentBooked {
            store_id,
            appointment_id: uuid::Uuid::new_v4(),
            client_name: "Ada".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap_or_default(),
            start_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap_or_default(),
            serial_no: 2,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn appointment_event_maps_to_appointment_notification() {
        let store_id = StoreId::new();
        let Some(notification) = notification_for(&booked_event(store_id)) else {
            panic!("expected notification");
        };
        assert_eq!(notification.store_id, store_id);
        assert_eq!(notification.category, NotificationCategory::Appointment);
        assert!(!notification.is_read);
        assert!(notification.message.contains("Ada"));
        assert!(notification.message.contains("#2"));
    }

    #[test]
    fn store_created_produces_no_notification() {
        let event = BookingEvent::StoreCreated {
            store_id: StoreId::new(),
            name: "Downtown Repair".to_string(),
            timestamp: Utc::now(),
        };
        assert!(notification_for(&event).is_none());
    }

    #[tokio::test]
    async fn visibility_is_role_scoped() {
        let log = NotificationLog::new();
        let store_id = StoreId::new();
        let Some(notification) = notification_for(&booked_event(store_id)) else {
            panic!("expected notification");
        };
        log.push(notification).await;

        assert_eq!(log.visible_to(&Actor::super_admin()).await.len(), 1);
        assert_eq!(log.visible_to(&Actor::manager_of(store_id)).await.len(), 1);
        assert!(
            log.visible_to(&Actor::manager_of(StoreId::new()))
                .await
                .is_empty()
        );
        assert!(log.visible_to(&Actor::client()).await.is_empty());
    }

    #[tokio::test]
    async fn spawned_task_records_published_events() {
        let bus = EventBus::new(100);
        let log = Arc::new(NotificationLog::new());
        let handle = spawn(&bus, Arc::clone(&log));

        let store_id = StoreId::new();
        bus.publish(booked_event(store_id));

        // The task runs concurrently; poll briefly until it catches up.
        for _ in 0..50 {
            if !log.is_empty().await {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert_eq!(log.len().await, 1);
        handle.abort();
    }
}
