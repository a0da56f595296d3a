//! Per-store, per-weekday operating-hours configuration.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BookingError;

/// Upper bound on `slots_per_hour`. Writes above this value are rejected;
/// the slot generator additionally clamps stored values to it.
pub const MAX_SLOTS_PER_HOUR: u32 = 6;

/// Returns the weekday index of a date with Monday = 0 .. Sunday = 6.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// Operating hours for one store on one weekday.
///
/// At most one `Schedule` exists per (store, day); the registry keys
/// schedules by `day` inside each store entry, and the database mirrors
/// this with a composite primary key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// Weekday index, 0 = Monday .. 6 = Sunday.
    pub day: u8,
    /// Whether the store takes appointments on this weekday.
    pub is_open: bool,
    /// Opening time. Required when `is_open`, may be absent when closed.
    pub open_time: Option<NaiveTime>,
    /// Closing time. Required when `is_open`, may be absent when closed.
    pub close_time: Option<NaiveTime>,
    /// Bookable slots per hour, within `[1, MAX_SLOTS_PER_HOUR]`.
    pub slots_per_hour: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Schedule {
    /// Builds a validated schedule row.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidSchedule`] when `day` exceeds 6,
    /// `slots_per_hour` is outside `[1, MAX_SLOTS_PER_HOUR]`, or the store
    /// is open without `open_time < close_time`.
    pub fn new(
        day: u8,
        is_open: bool,
        open_time: Option<NaiveTime>,
        close_time: Option<NaiveTime>,
        slots_per_hour: u32,
    ) -> Result<Self, BookingError> {
        if day > 6 {
            return Err(BookingError::InvalidSchedule(format!(
                "day must be 0..=6 (Monday..Sunday), got {day}"
            )));
        }
        if slots_per_hour < 1 || slots_per_hour > MAX_SLOTS_PER_HOUR {
            return Err(BookingError::InvalidSchedule(format!(
                "slots_per_hour must be within 1..={MAX_SLOTS_PER_HOUR}, got {slots_per_hour}"
            )));
        }
        if is_open {
            match (open_time, close_time) {
                (Some(open), Some(close)) if open < close => {}
                (Some(_), Some(_)) => {
                    return Err(BookingError::InvalidSchedule(
                        "open_time must be before close_time".to_string(),
                    ));
                }
                _ => {
                    return Err(BookingError::InvalidSchedule(
                        "open_time and close_time are required when the store is open"
                            .to_string(),
                    ));
                }
            }
        }
        let now = Utc::now();
        Ok(Self {
            day,
            is_open,
            open_time,
            close_time,
            slots_per_hour,
            created_at: now,
            updated_at: now,
        })
    }

    /// Slot duration in whole minutes, derived as `60 / slots_per_hour`.
    ///
    /// The stored value is already constrained to `[1, MAX_SLOTS_PER_HOUR]`;
    /// the clamp here keeps the generator well-defined even for rows written
    /// before the constraint existed.
    #[must_use]
    pub fn slot_duration_minutes(&self) -> u32 {
        60 / self.slots_per_hour.clamp(1, MAX_SLOTS_PER_HOUR)
    }
}
