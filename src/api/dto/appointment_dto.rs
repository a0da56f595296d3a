//! Appointment and slot DTOs for the booking endpoints.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Appointment, BookingRequest, Slot, StoreId};

/// Query parameters for `GET /stores/{id}/available-slots`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SlotQuery {
    /// Target date (`YYYY-MM-DD`). Defaults to the current calendar date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// One bookable window in responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct SlotDto {
    /// Window start (`HH:MM:SS`).
    pub start_time: NaiveTime,
    /// Window end (`HH:MM:SS`).
    pub end_time: NaiveTime,
    /// 1-based wall-clock position of the window within the day.
    pub serial_no: u32,
}

impl From<Slot> for SlotDto {
    fn from(slot: Slot) -> Self {
        Self {
            start_time: slot.start_time,
            end_time: slot.end_time,
            serial_no: slot.serial_no,
        }
    }
}

/// Request body for `POST /appointments`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookAppointmentRequest {
    /// Target store.
    #[schema(value_type = uuid::Uuid)]
    pub store_id: StoreId,
    /// Target date (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Requested slot start (`HH:MM:SS`); omitted means "earliest
    /// available".
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
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
}

impl From<BookAppointmentRequest> for BookingRequest {
    fn from(req: BookAppointmentRequest) -> Self {
        Self {
            store_id: req.store_id,
            date: req.date,
            start_time: req.start_time,
            client_name: req.client_name,
            client_email: req.client_email,
            client_phone: req.client_phone,
            repair_type: req.repair_type,
            category: req.category,
            brand: req.brand,
            device_model: req.device_model,
        }
    }
}

/// A persisted appointment in responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct AppointmentResponse {
    /// Appointment identifier.
    pub id: uuid::Uuid,
    /// Owning store.
    #[schema(value_type = uuid::Uuid)]
    pub store_id: StoreId,
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
    /// Assigned slot start.
    pub start_time: NaiveTime,
    /// Assigned slot end.
    pub end_time: NaiveTime,
    /// Assigned slot serial number.
    pub serial_no: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Appointment> for AppointmentResponse {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            store_id: a.store_id,
            client_name: a.client_name,
            client_email: a.client_email,
            client_phone: a.client_phone,
            repair_type: a.repair_type,
            category: a.category,
            brand: a.brand,
            device_model: a.device_model,
            date: a.date,
            start_time: a.start_time,
            end_time: a.end_time,
            serial_no: a.serial_no,
            created_at: a.created_at,
        }
    }
}

/// Query parameters for `GET /appointments`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AppointmentListParams {
    /// Restrict the listing to one date (`YYYY-MM-DD`).
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// List response for `GET /appointments`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AppointmentListResponse {
    /// Appointments visible to the actor.
    pub data: Vec<AppointmentResponse>,
    /// Total count.
    pub total: usize,
}
