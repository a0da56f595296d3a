//! Service layer: business logic orchestration.
//!
//! [`BookingService`] coordinates store, schedule, and appointment
//! operations, arbitrates slot selection, and emits events through the
//! [`crate::domain::EventBus`].

pub mod booking_service;

pub use booking_service::BookingService;
