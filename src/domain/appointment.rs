//! Appointment entity and the client-facing booking request.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::store_id::StoreId;
use crate::error::BookingError;

/// A persisted appointment.
///
/// `start_time`, `end_time`, and `serial_no` are always copied verbatim
/// from the slot chosen by the arbiter; callers never supply them.
/// Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    /// Unique appointment identifier (UUID v4).
    pub id: uuid::Uuid,
    /// Owning store.
    pub store_id: StoreId,
    /// Client display name.
    pub client_name: String,
    /// Client contact e-mail.
    pub client_email: String,
    /// Client contact phone number.
    pub client_phone: String,
    /// Requested repair service (e.g. `"screen replacement"`).
    pub repair_type: String,
    /// Device category (e.g. `"smartphone"`).
    pub category: String,
    /// Device brand.
    pub brand: String,
    /// Device model.
    pub device_model: String,
    /// Appointment date.
    pub date: NaiveDate,
    /// Slot start, minute granularity.
    pub start_time: NaiveTime,
    /// Slot end, minute granularity.
    pub end_time: NaiveTime,
    /// 1-based wall-clock position of the slot within the day.
    pub serial_no: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A client's request to book an appointment.
///
/// `start_time` is optional: when absent the arbiter assigns the earliest
/// available slot for the date.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    /// Target store.
    pub store_id: StoreId,
    /// Target date.
    pub date: NaiveDate,
    /// Requested slot start; `None` means "earliest available".
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

impl BookingRequest {
    /// Validates the client-supplied fields.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidRequest`] when a required contact or
    /// service field is empty, or the e-mail is obviously malformed.
    pub fn validate(&self) -> Result<(), BookingError> {
        let required = [
            ("client_name", &self.client_name),
            ("client_phone", &self.client_phone),
            ("repair_type", &self.repair_type),
            ("category", &self.category),
            ("brand", &self.brand),
            ("device_model", &self.device_model),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(BookingError::InvalidRequest(format!("{field} is required")));
            }
        }
        if !self.client_email.contains('@') {
            return Err(BookingError::InvalidRequest(
                "client_email must be a valid e-mail address".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn valid_request() -> BookingRequest {
        BookingRequest {
            store_id: StoreId::new(),
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap_or_default(),
            start_time: None,
            client_name: "Ada Lovelace".to_string(),
            client_email: "ada@example.com".to_string(),
            client_phone: "+1-555-0100".to_string(),
            repair_type: "screen replacement".to_string(),
            category: "smartphone".to_string(),
            brand: "Acme".to_string(),
            device_model: "Acme One".to_string(),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn empty_client_name_rejected() {
        let mut req = valid_request();
        req.client_name = "  ".to_string();
        assert!(matches!(
            req.validate(),
            Err(BookingError::InvalidRequest(_))
        ));
    }

    #[test]
    fn malformed_email_rejected() {
        let mut req = valid_request();
        req.client_email = "not-an-email".to_string();
        assert!(matches!(
            req.validate(),
            Err(BookingError::InvalidRequest(_))
        ));
    }
}
