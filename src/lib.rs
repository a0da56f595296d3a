//! # bookline-gateway
//!
//! REST backend for repair-shop appointment booking across franchise
//! stores. Each store publishes weekly operating hours; the gateway
//! derives bookable slots from them on demand and arbitrates concurrent
//! booking attempts so that every `(store, date, start time)` is assigned
//! at most once.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── BookingService (service/)
//!     ├── EventBus (domain/)
//!     │       └── Notifier task (notifier/)
//!     │
//!     ├── StoreRegistry (domain/)
//!     │
//!     └── PostgreSQL Persistence (optional)
//! ```
//!
//! Live state is held in the in-memory [`domain::StoreRegistry`];
//! PostgreSQL is an optional durability layer restored at startup. Slots
//! are never stored: they are recomputed from the weekday schedule and
//! the set of booked start times on every read.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod notifier;
pub mod persistence;
pub mod service;
