//! In-memory state for one store: profile, weekday schedules, appointments.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use super::appointment::Appointment;
use super::schedule::{Schedule, weekday_index};
use super::slot::truncate_to_minute;
use super::store_id::StoreId;
use crate::error::BookingError;

/// One store's live state behind a per-store lock in the registry.
///
/// The appointment map is keyed by `(date, start_time)`: an occupied key is
/// the in-process equivalent of the database uniqueness constraint on
/// (store, date, start_time).
#[derive(Debug)]
pub struct StoreEntry {
    /// Store identifier.
    pub store_id: StoreId,
    /// Store display name.
    pub name: String,
    /// Free-form street address.
    pub location: String,
    /// Name of the managing person, when known.
    pub manager_name: Option<String>,
    /// Inactive stores are kept but hidden from default listings.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Weekday schedules keyed by day index (0 = Monday .. 6 = Sunday).
    pub schedules: HashMap<u8, Schedule>,
    /// Appointments keyed by (date, minute-truncated start time).
    pub appointments: BTreeMap<(NaiveDate, NaiveTime), Appointment>,
}

impl StoreEntry {
    /// Creates a fresh entry with no schedules or appointments.
    #[must_use]
    pub fn new(
        store_id: StoreId,
        name: String,
        location: String,
        manager_name: Option<String>,
    ) -> Self {
        Self {
            store_id,
            name,
            location,
            manager_name,
            is_active: true,
            created_at: Utc::now(),
            schedules: HashMap::new(),
            appointments: BTreeMap::new(),
        }
    }

    /// Returns the schedule covering `date`'s weekday, if any.
    #[must_use]
    pub fn schedule_for(&self, date: NaiveDate) -> Option<&Schedule> {
        self.schedules.get(&weekday_index(date))
    }

    /// Distinct minute-truncated start times already booked on `date`:
    /// the exclusion set fed to the slot generator.
    #[must_use]
    pub fn booked_starts(&self, date: NaiveDate) -> HashSet<NaiveTime> {
        self.appointments
            .range((date, NaiveTime::MIN)..)
            .take_while(|((d, _), _)| *d == date)
            .map(|((_, start), _)| truncate_to_minute(*start))
            .collect()
    }

    /// Inserts an appointment, enforcing at most one per (date, start_time).
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::StorageConflict`] when the key is already
    /// occupied: another writer claimed the slot first.
    pub fn insert_appointment(&mut self, appointment: Appointment) -> Result<(), BookingError> {
        let key = (
            appointment.date,
            truncate_to_minute(appointment.start_time),
        );
        if self.appointments.contains_key(&key) {
            return Err(BookingError::StorageConflict);
        }
        self.appointments.insert(key, appointment);
        Ok(())
    }

    /// Appointments for this store, optionally restricted to one date,
    /// ordered by (date, start_time).
    #[must_use]
    pub fn appointments_on(&self, date: Option<NaiveDate>) -> Vec<Appointment> {
        match date {
            Some(d) => self
                .appointments
                .range((d, NaiveTime::MIN)..)
                .take_while(|((day, _), _)| *day == d)
                .map(|(_, a)| a.clone())
                .collect(),
            None => self.appointments.values().cloned().collect(),
        }
    }
}

/// Lightweight store projection for list responses.
#[derive(Debug, Clone, Serialize)]
pub struct StoreSummary {
    /// Store identifier.
    pub store_id: StoreId,
    /// Store display name.
    pub name: String,
    /// Free-form street address.
    pub location: String,
    /// Whether the store is active.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Number of weekday schedules configured.
    pub schedule_days: usize,
    /// Number of appointments on the books.
    pub appointment_count: usize,
}

impl From<&StoreEntry> for StoreSummary {
    fn from(entry: &StoreEntry) -> Self {
        Self {
            store_id: entry.store_id,
            name: entry.name.clone(),
            location: entry.location.clone(),
            is_active: entry.is_active,
            created_at: entry.created_at,
            schedule_days: entry.schedules.len(),
            appointment_count: entry.appointments.len(),
        }
    }
}
