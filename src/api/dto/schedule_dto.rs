//! Schedule DTOs for the weekday operating-hours endpoints.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Schedule, StoreId};

/// Request body for `PUT /stores/{id}/schedules/{day}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpsertScheduleRequest {
    /// Whether the store takes appointments on this weekday.
    #[serde(default = "default_is_open")]
    pub is_open: bool,
    /// Opening time (`HH:MM:SS`). Required when open.
    #[serde(default)]
    pub open_time: Option<NaiveTime>,
    /// Closing time (`HH:MM:SS`). Required when open.
    #[serde(default)]
    pub close_time: Option<NaiveTime>,
    /// Bookable slots per hour, 1..=6.
    pub slots_per_hour: u32,
}

fn default_is_open() -> bool {
    true
}

/// One weekday schedule in responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleResponse {
    /// Owning store.
    #[schema(value_type = uuid::Uuid)]
    pub store_id: StoreId,
    /// Weekday index, 0 = Monday .. 6 = Sunday.
    pub day: u8,
    /// Whether the store is open on this weekday.
    pub is_open: bool,
    /// Opening time, when open.
    pub open_time: Option<NaiveTime>,
    /// Closing time, when open.
    pub close_time: Option<NaiveTime>,
    /// Bookable slots per hour.
    pub slots_per_hour: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ScheduleResponse {
    /// Builds the response for a schedule of `store_id`.
    #[must_use]
    pub fn from_schedule(store_id: StoreId, schedule: &Schedule) -> Self {
        Self {
            store_id,
            day: schedule.day,
            is_open: schedule.is_open,
            open_time: schedule.open_time,
            close_time: schedule.close_time,
            slots_per_hour: schedule.slots_per_hour,
            created_at: schedule.created_at,
            updated_at: schedule.updated_at,
        }
    }
}
