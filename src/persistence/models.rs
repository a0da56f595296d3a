//! Database row models and their conversions into domain types.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::{Appointment, Schedule, StoreEntry, StoreId};
use crate::error::BookingError;

/// A row from the `stores` table.
#[derive(Debug, Clone, FromRow)]
pub struct StoreRow {
    /// Store UUID.
    pub id: Uuid,
    /// Store display name.
    pub name: String,
    /// Free-form street address.
    pub location: String,
    /// Managing person, when known.
    pub manager_name: Option<String>,
    /// Whether the store is active.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<StoreRow> for StoreEntry {
    fn from(row: StoreRow) -> Self {
        Self {
            store_id: StoreId::from_uuid(row.id),
            name: row.name,
            location: row.location,
            manager_name: row.manager_name,
            is_active: row.is_active,
            created_at: row.created_at,
            schedules: std::collections::HashMap::new(),
            appointments: std::collections::BTreeMap::new(),
        }
    }
}

/// A row from the `store_schedules` table.
#[derive(Debug, Clone, FromRow)]
pub struct ScheduleRow {
    /// Owning store UUID.
    pub store_id: Uuid,
    /// Weekday index, 0 = Monday .. 6 = Sunday.
    pub day: i32,
    /// Whether the store is open on this weekday.
    pub is_open: bool,
    /// Opening time, when open.
    pub open_time: Option<NaiveTime>,
    /// Closing time, when open.
    pub close_time: Option<NaiveTime>,
    /// Slots per hour.
    pub slots_per_hour: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ScheduleRow> for Schedule {
    type Error = BookingError;

    fn try_from(row: ScheduleRow) -> Result<Self, Self::Error> {
        let day = u8::try_from(row.day)
            .map_err(|_| BookingError::PersistenceError(format!("corrupt day: {}", row.day)))?;
        let slots_per_hour = u32::try_from(row.slots_per_hour).map_err(|_| {
            BookingError::PersistenceError(format!("corrupt slots_per_hour: {}", row.slots_per_hour))
        })?;
        Ok(Self {
            day,
            is_open: row.is_open,
            open_time: row.open_time,
            close_time: row.close_time,
            slots_per_hour,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A row from the `appointments` table.
#[derive(Debug, Clone, FromRow)]
pub struct AppointmentRow {
    /// Appointment UUID.
    pub id: Uuid,
    /// Owning store UUID.
    pub store_id: Uuid,
    /// Client display name.
    pub client_name: String,
    /// Client contact e-mail.
    pub client_email: String,
    /// Client contact phone number.
    pub client_phone: String,
    /// Requested repair service.
    pub repair_type: String,
    /// Device category.
    pub category: String,
    /// Device brand.
    pub brand: String,
    /// Device model.
    pub device_model: String,
    /// Appointment date.
    pub date: NaiveDate,
    /// Slot start.
    pub start_time: NaiveTime,
    /// Slot end.
    pub end_time: NaiveTime,
    /// 1-based slot serial number.
    pub serial_no: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = BookingError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        let serial_no = u32::try_from(row.serial_no).map_err(|_| {
            BookingError::PersistenceError(format!("corrupt serial_no: {}", row.serial_no))
        })?;
        Ok(Self {
            id: row.id,
            store_id: StoreId::from_uuid(row.store_id),
            client_name: row.client_name,
            client_email: row.client_email,
            client_phone: row.client_phone,
            repair_type: row.repair_type,
            category: row.category,
            brand: row.brand,
            device_model: row.device_model,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            serial_no,
            created_at: row.created_at,
        })
    }
}
