//! Type-safe store identifier.
//!
//! [`StoreId`] is a newtype wrapper around [`uuid::Uuid`] (v4) providing
//! type safety so that store identifiers cannot be confused with other
//! UUIDs (appointment IDs, notification IDs).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a franchise store.
///
/// Wraps a UUID v4. Generated once at store creation time and immutable
/// thereafter. Used as the dictionary key in [`super::StoreRegistry`] and
/// as the tenant discriminator on every schedule, appointment, and event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(uuid::Uuid);

impl StoreId {
    /// Creates a new random `StoreId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `StoreId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for StoreId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<uuid::Uuid> for StoreId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

impl From<StoreId> for uuid::Uuid {
    fn from(id: StoreId) -> Self {
        id.0
    }
}
