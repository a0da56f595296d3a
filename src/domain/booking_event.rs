//! Domain events reflecting booking-side state mutations.
//!
//! Every successful write publishes a [`BookingEvent`] through the
//! [`super::EventBus`]. The notifier consumes them to materialize
//! notifications, and events are optionally appended to the PostgreSQL
//! event log. This replaces implicit write hooks: side effects only ever
//! happen through explicit publication after a committed write.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use super::store_id::StoreId;

/// Domain event emitted after every committed state mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum BookingEvent {
    /// Emitted when a new store is registered.
    StoreCreated {
        /// Store identifier.
        store_id: StoreId,
        /// Store display name.
        name: String,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a weekday schedule is created or updated.
    ScheduleUpdated {
        /// Store identifier.
        store_id: StoreId,
        /// Weekday index, 0 = Monday .. 6 = Sunday.
        day: u8,
        /// Whether the store is open on that weekday after the write.
        is_open: bool,
        /// Update timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after an appointment is committed.
    AppointmentBooked {
        /// Store identifier.
        store_id: StoreId,
        /// Appointment identifier.
        appointment_id: uuid::Uuid,
        /// Client display name.
        client_name: String,
        /// Appointment date.
        date: NaiveDate,
        /// Assigned slot start.
        start_time: NaiveTime,
        /// Assigned slot serial number.
        serial_no: u32,
        /// Booking timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl BookingEvent {
    /// Returns the store ID associated with this event.
    #[must_use]
    pub fn store_id(&self) -> StoreId {
        match self {
            Self::StoreCreated { store_id, .. }
            | Self::ScheduleUpdated { store_id, .. }
            | Self::AppointmentBooked { store_id, .. } => *store_id,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::StoreCreated { .. } => "store_created",
            Self::ScheduleUpdated { .. } => "schedule_updated",
            Self::AppointmentBooked { .. } => "appointment_booked",
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn event_type_strings() {
        let id = StoreId::new();
        let created = BookingEvent::StoreCreated {
            store_id: id,
            name: "Downtown Repair".to_string(),
            timestamp: Utc::now(),
        };
        assert_eq!(created.event_type_str(), "store_created");
        assert_eq!(created.store_id(), id);
    }

    #[test]
    fn appointment_booked_serializes_with_tag() {
        let event = BookingEvent::AppointmentBooked {
            store_id: StoreId::new(),
            appointment_id: uuid::Uuid::new_v4(),
            client_name: "Ada".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap_or_default(),
            start_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap_or_default(),
            serial_no: 2,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap_or_default();
        assert!(json.contains("appointment_booked"));
        assert!(json.contains("09:30"));
    }
}
