//! Domain layer: store identity, schedules, slot generation, events.
//!
//! This module contains the server-side domain model: the store registry
//! with per-store locking, weekday schedules, the pure slot generator, the
//! request actor, and the event bus for broadcasting committed writes.

pub mod actor;
pub mod appointment;
pub mod booking_event;
pub mod event_bus;
pub mod schedule;
pub mod slot;
pub mod store_entry;
pub mod store_id;
pub mod store_registry;

pub use actor::{Actor, Role};
pub use appointment::{Appointment, BookingRequest};
pub use booking_event::BookingEvent;
pub use event_bus::EventBus;
pub use schedule::{MAX_SLOTS_PER_HOUR, Schedule, weekday_index};
pub use slot::{Slot, generate_available_slots, truncate_to_minute};
pub use store_entry::{StoreEntry, StoreSummary};
pub use store_id::StoreId;
pub use store_registry::StoreRegistry;
