//! Persistence layer: PostgreSQL-backed durability for stores, schedules,
//! appointments, and the event log.
//!
//! The in-memory registry stays authoritative for reads either way; this
//! layer makes writes durable, carries the `UNIQUE (store_id, date,
//! start_time)` constraint that arbitrates concurrent bookings across
//! processes, and restores the registry at startup.

pub mod models;
pub mod postgres;

pub use postgres::PostgresPersistence;
