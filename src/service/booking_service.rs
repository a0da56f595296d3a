//! Booking service: orchestrates store, schedule, and appointment writes
//! and emits events.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};

use crate::domain::{
    Actor, Appointment, BookingEvent, BookingRequest, EventBus, Role, Schedule, Slot, StoreEntry,
    StoreId, StoreRegistry, StoreSummary, generate_available_slots, truncate_to_minute,
};
use crate::error::BookingError;
use crate::persistence::PostgresPersistence;

/// Orchestration layer for all booking operations.
///
/// Stateless coordinator: owns references to [`StoreRegistry`] for live
/// state, [`EventBus`] for event emission, and (optionally) the PostgreSQL
/// persistence layer for durable writes. Every mutation follows the
/// pattern: validate → acquire the store lock → write → persist → publish.
///
/// The arbiter itself never retries a lost booking race; `StorageConflict`
/// is surfaced to the caller, who may retry with a fresh slot read.
#[derive(Debug, Clone)]
pub struct BookingService {
    registry: Arc<StoreRegistry>,
    event_bus: EventBus,
    persistence: Option<PostgresPersistence>,
    event_log_enabled: bool,
}

impl BookingService {
    /// Creates a memory-only `BookingService`.
    #[must_use]
    pub fn new(registry: Arc<StoreRegistry>, event_bus: EventBus) -> Self {
        Self {
            registry,
            event_bus,
            persistence: None,
            event_log_enabled: false,
        }
    }

    /// Attaches the PostgreSQL persistence layer.
    #[must_use]
    pub fn with_persistence(
        mut self,
        persistence: PostgresPersistence,
        event_log_enabled: bool,
    ) -> Self {
        self.persistence = Some(persistence);
        self.event_log_enabled = event_log_enabled;
        self
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the inner [`StoreRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<StoreRegistry> {
        &self.registry
    }

    /// Registers a new store.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Forbidden`] unless the actor is a
    /// super-admin, [`BookingError::InvalidRequest`] on empty fields, or a
    /// persistence error when the durable write fails.
    pub async fn create_store(
        &self,
        actor: &Actor,
        name: &str,
        location: &str,
        manager_name: Option<String>,
    ) -> Result<StoreId, BookingError> {
        if actor.role != Role::SuperAdmin {
            return Err(BookingError::Forbidden(
                "only a super-admin may create stores".to_string(),
            ));
        }
        if name.trim().is_empty() || location.trim().is_empty() {
            return Err(BookingError::InvalidRequest(
                "name and location are required".to_string(),
            ));
        }

        let entry = StoreEntry::new(
            StoreId::new(),
            name.to_string(),
            location.to_string(),
            manager_name,
        );
        if let Some(persistence) = &self.persistence {
            persistence.save_store(&entry).await?;
        }
        let store_id = self.registry.insert(entry).await?;

        self.record_event(BookingEvent::StoreCreated {
            store_id,
            name: name.to_string(),
            timestamp: Utc::now(),
        })
        .await;

        tracing::info!(%store_id, name, "store created");
        Ok(store_id)
    }

    /// Returns summaries of all stores.
    pub async fn list_stores(&self) -> Vec<StoreSummary> {
        self.registry.list().await
    }

    /// Creates or replaces the schedule for one weekday of a store.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Forbidden`] when the actor does not manage
    /// the store, [`BookingError::InvalidSchedule`] on constraint
    /// violations (day range, `slots_per_hour` bounds, time ordering),
    /// [`BookingError::StoreNotFound`] for an unknown store, or a
    /// persistence error when the durable write fails.
    pub async fn upsert_schedule(
        &self,
        actor: &Actor,
        store_id: StoreId,
        day: u8,
        is_open: bool,
        open_time: Option<NaiveTime>,
        close_time: Option<NaiveTime>,
        slots_per_hour: u32,
    ) -> Result<Schedule, BookingError> {
        if !actor.manages(store_id) {
            return Err(BookingError::Forbidden(
                "actor does not manage this store".to_string(),
            ));
        }
        let mut schedule = Schedule::new(day, is_open, open_time, close_time, slots_per_hour)?;

        let entry_lock = self.registry.get(store_id).await?;
        let mut entry = entry_lock.write().await;

        // Replacing an existing day keeps its original creation time.
        if let Some(existing) = entry.schedules.get(&day) {
            schedule.created_at = existing.created_at;
        }

        if let Some(persistence) = &self.persistence {
            persistence.save_schedule(store_id, &schedule).await?;
        }
        entry.schedules.insert(day, schedule.clone());
        drop(entry);

        self.record_event(BookingEvent::ScheduleUpdated {
            store_id,
            day,
            is_open,
            timestamp: Utc::now(),
        })
        .await;

        tracing::info!(%store_id, day, is_open, slots_per_hour, "schedule updated");
        Ok(schedule)
    }

    /// Returns the store's weekday schedules visible to the actor, ordered
    /// by day. Actors without visibility get an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::StoreNotFound`] for an unknown store.
    pub async fn list_schedules(
        &self,
        actor: &Actor,
        store_id: StoreId,
    ) -> Result<Vec<Schedule>, BookingError> {
        let entry_lock = self.registry.get(store_id).await?;
        if !actor.sees(store_id) {
            return Ok(Vec::new());
        }
        let entry = entry_lock.read().await;
        let mut schedules: Vec<Schedule> = entry.schedules.values().cloned().collect();
        schedules.sort_by_key(|s| s.day);
        Ok(schedules)
    }

    /// Computes the available slots for `(store, date)`.
    ///
    /// Recomputed fresh on every call from the weekday schedule and the
    /// exclusion set of booked start times; a missing or closed schedule
    /// yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::StoreNotFound`] for an unknown store.
    pub async fn available_slots(
        &self,
        store_id: StoreId,
        date: NaiveDate,
    ) -> Result<Vec<Slot>, BookingError> {
        let entry_lock = self.registry.get(store_id).await?;
        let entry = entry_lock.read().await;
        Ok(slots_for_entry(&entry, date))
    }

    /// Books an appointment: the arbiter.
    ///
    /// Selects the requested slot (minute-truncated exact match) or the
    /// earliest available one, then persists the appointment with
    /// `start_time`, `end_time`, and `serial_no` copied verbatim from the
    /// chosen slot. Publishes `AppointmentBooked` after the commit.
    ///
    /// # Errors
    ///
    /// - [`BookingError::StoreNotFound`] for an unknown store.
    /// - [`BookingError::InvalidRequest`] on malformed client fields.
    /// - [`BookingError::NoAvailability`] when nothing is bookable that day.
    /// - [`BookingError::SlotUnavailable`] when an explicitly requested
    ///   time is not offered (outside hours or already booked).
    /// - [`BookingError::StorageConflict`] when a concurrent booking won
    ///   the race at the storage layer.
    pub async fn book(&self, request: BookingRequest) -> Result<Appointment, BookingError> {
        request.validate()?;

        let entry_lock = self.registry.get(request.store_id).await?;
        let mut entry = entry_lock.write().await;

        let slots = slots_for_entry(&entry, request.date);
        if slots.is_empty() {
            return Err(BookingError::NoAvailability);
        }

        let slot = match request.start_time {
            Some(requested) => {
                let requested = truncate_to_minute(requested);
                let Some(slot) = slots.into_iter().find(|s| s.start_time == requested) else {
                    tracing::debug!(
                        store_id = %request.store_id,
                        date = %request.date,
                        %requested,
                        "requested slot not offered"
                    );
                    return Err(BookingError::SlotUnavailable);
                };
                slot
            }
            None => slots
                .into_iter()
                .next()
                .ok_or(BookingError::NoAvailability)?,
        };

        let appointment = Appointment {
            id: uuid::Uuid::new_v4(),
            store_id: request.store_id,
            client_name: request.client_name,
            client_email: request.client_email,
            client_phone: request.client_phone,
            repair_type: request.repair_type,
            category: request.category,
            brand: request.brand,
            device_model: request.device_model,
            date: request.date,
            start_time: slot.start_time,
            end_time: slot.end_time,
            serial_no: slot.serial_no,
            created_at: Utc::now(),
        };

        // The durable uniqueness constraint arbitrates first when enabled;
        // the in-memory map insert is the in-process final authority.
        if let Some(persistence) = &self.persistence {
            persistence.save_appointment(&appointment).await?;
        }
        entry.insert_appointment(appointment.clone())?;
        drop(entry);

        self.record_event(BookingEvent::AppointmentBooked {
            store_id: appointment.store_id,
            appointment_id: appointment.id,
            client_name: appointment.client_name.clone(),
            date: appointment.date,
            start_time: appointment.start_time,
            serial_no: appointment.serial_no,
            timestamp: Utc::now(),
        })
        .await;

        tracing::info!(
            store_id = %appointment.store_id,
            appointment_id = %appointment.id,
            date = %appointment.date,
            start_time = %appointment.start_time,
            serial_no = appointment.serial_no,
            "appointment booked"
        );
        Ok(appointment)
    }

    /// Lists appointments visible to the actor, optionally restricted to
    /// one date. Super-admins see every store; managers and staff see
    /// their own store; anyone else gets an empty list.
    pub async fn list_appointments(
        &self,
        actor: &Actor,
        date: Option<NaiveDate>,
    ) -> Vec<Appointment> {
        match actor.role {
            Role::SuperAdmin => {
                let mut all = Vec::new();
                for entry_lock in self.registry.entries().await {
                    let entry = entry_lock.read().await;
                    all.extend(entry.appointments_on(date));
                }
                all.sort_by_key(|a| (a.date, a.start_time));
                all
            }
            Role::StoreManager | Role::Staff => {
                let Some(store_id) = actor.store_id else {
                    return Vec::new();
                };
                let Ok(entry_lock) = self.registry.get(store_id).await else {
                    return Vec::new();
                };
                let entry = entry_lock.read().await;
                entry.appointments_on(date)
            }
            Role::Client => Vec::new(),
        }
    }

    /// Appends the event to the durable log (when enabled), then publishes
    /// it on the bus. Log failures are reported but never fail the write
    /// that already committed.
    async fn record_event(&self, event: BookingEvent) {
        if self.event_log_enabled
            && let Some(persistence) = &self.persistence
        {
            match serde_json::to_value(&event) {
                Ok(payload) => {
                    if let Err(e) = persistence
                        .save_event(event.store_id(), event.event_type_str(), &payload)
                        .await
                    {
                        tracing::warn!(error = %e, "event log append failed");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "event serialization failed"),
            }
        }
        let _ = self.event_bus.publish(event);
    }
}

/// Generates the slot list for a store entry on `date`.
fn slots_for_entry(entry: &StoreEntry, date: NaiveDate) -> Vec<Slot> {
    match entry.schedule_for(date) {
        Some(schedule) => generate_available_slots(schedule, date, &entry.booked_starts(date)),
        None => Vec::new(),
    }
}
