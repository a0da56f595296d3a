//! PostgreSQL implementation of the persistence layer.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::models::{AppointmentRow, ScheduleRow, StoreRow};
use crate::config::BookingConfig;
use crate::domain::{Appointment, Schedule, StoreEntry, StoreId};
use crate::error::BookingError;

/// PostgreSQL unique-violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed persistence layer using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    /// Creates a new persistence layer with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to PostgreSQL using the pool settings from `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError::PersistenceError`] when the connection
    /// cannot be established.
    pub async fn connect(config: &BookingConfig) -> Result<Self, BookingError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(|e| BookingError::PersistenceError(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// Applies pending migrations from the embedded `./migrations` set.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError::PersistenceError`] on migration failure.
    pub async fn run_migrations(&self) -> Result<(), BookingError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| BookingError::PersistenceError(e.to_string()))
    }

    /// Inserts the profile fields of a new store.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError::PersistenceError`] on database failure.
    pub async fn save_store(&self, entry: &StoreEntry) -> Result<(), BookingError> {
        sqlx::query(
            "INSERT INTO stores (id, name, location, manager_name, is_active, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(entry.store_id.as_uuid())
        .bind(&entry.name)
        .bind(&entry.location)
        .bind(&entry.manager_name)
        .bind(entry.is_active)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| BookingError::PersistenceError(e.to_string()))?;
        Ok(())
    }

    /// Upserts the weekday schedule for a store.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError::PersistenceError`] on database failure.
    pub async fn save_schedule(
        &self,
        store_id: StoreId,
        schedule: &Schedule,
    ) -> Result<(), BookingError> {
        sqlx::query(
            "INSERT INTO store_schedules \
             (store_id, day, is_open, open_time, close_time, slots_per_hour, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (store_id, day) DO UPDATE SET \
             is_open = EXCLUDED.is_open, open_time = EXCLUDED.open_time, \
             close_time = EXCLUDED.close_time, slots_per_hour = EXCLUDED.slots_per_hour, \
             updated_at = EXCLUDED.updated_at",
        )
        .bind(store_id.as_uuid())
        .bind(i32::from(schedule.day))
        .bind(schedule.is_open)
        .bind(schedule.open_time)
        .bind(schedule.close_time)
        .bind(i32::try_from(schedule.slots_per_hour).unwrap_or(i32::MAX))
        .bind(schedule.created_at)
        .bind(schedule.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| BookingError::PersistenceError(e.to_string()))?;
        Ok(())
    }

    /// Inserts an appointment.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::StorageConflict`] when the `UNIQUE
    /// (store_id, date, start_time)` constraint rejects the write: another
    /// booking claimed the slot first. Any other database failure maps to
    /// [`BookingError::PersistenceError`].
    pub async fn save_appointment(&self, appointment: &Appointment) -> Result<(), BookingError> {
        sqlx::query(
            "INSERT INTO appointments \
             (id, store_id, client_name, client_email, client_phone, repair_type, category, \
              brand, device_model, date, start_time, end_time, serial_no, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(appointment.id)
        .bind(appointment.store_id.as_uuid())
        .bind(&appointment.client_name)
        .bind(&appointment.client_email)
        .bind(&appointment.client_phone)
        .bind(&appointment.repair_type)
        .bind(&appointment.category)
        .bind(&appointment.brand)
        .bind(&appointment.device_model)
        .bind(appointment.date)
        .bind(appointment.start_time)
        .bind(appointment.end_time)
        .bind(i32::try_from(appointment.serial_no).unwrap_or(i32::MAX))
        .bind(appointment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                BookingError::StorageConflict
            } else {
                BookingError::PersistenceError(e.to_string())
            }
        })?;
        Ok(())
    }

    /// Appends a domain event to the `booking_events` log.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError::PersistenceError`] on database failure.
    pub async fn save_event(
        &self,
        store_id: StoreId,
        event_type: &str,
        payload: &serde_json::Value,
    ) -> Result<i64, BookingError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO booking_events (store_id, event_type, payload) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(store_id.as_uuid())
        .bind(event_type)
        .bind(payload)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| BookingError::PersistenceError(e.to_string()))?;
        Ok(id)
    }

    /// Rebuilds the full set of store entries (profiles, schedules,
    /// appointments) for registry restoration at startup.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError::PersistenceError`] on database failure or
    /// when a row cannot be converted back into its domain type.
    pub async fn restore(&self) -> Result<Vec<StoreEntry>, BookingError> {
        let store_rows = sqlx::query_as::<_, StoreRow>(
            "SELECT id, name, location, manager_name, is_active, created_at \
             FROM stores ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BookingError::PersistenceError(e.to_string()))?;

        let schedule_rows = sqlx::query_as::<_, ScheduleRow>(
            "SELECT store_id, day, is_open, open_time, close_time, slots_per_hour, \
             created_at, updated_at FROM store_schedules",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BookingError::PersistenceError(e.to_string()))?;

        let appointment_rows = sqlx::query_as::<_, AppointmentRow>(
            "SELECT id, store_id, client_name, client_email, client_phone, repair_type, \
             category, brand, device_model, date, start_time, end_time, serial_no, created_at \
             FROM appointments ORDER BY date, start_time",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BookingError::PersistenceError(e.to_string()))?;

        let mut entries: std::collections::HashMap<uuid::Uuid, StoreEntry> = store_rows
            .into_iter()
            .map(|row| (row.id, StoreEntry::from(row)))
            .collect();

        for row in schedule_rows {
            let store_id = row.store_id;
            let schedule = Schedule::try_from(row)?;
            if let Some(entry) = entries.get_mut(&store_id) {
                entry.schedules.insert(schedule.day, schedule);
            }
        }

        for row in appointment_rows {
            let store_id = row.store_id;
            let appointment = Appointment::try_from(row)?;
            if let Some(entry) = entries.get_mut(&store_id) {
                entry.insert_appointment(appointment)?;
            }
        }

        Ok(entries.into_values().collect())
    }
}

/// Whether a sqlx error is a PostgreSQL unique-constraint violation.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .as_deref()
        == Some(UNIQUE_VIOLATION)
}
