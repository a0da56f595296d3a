//! Explicit request actor: who is calling, acting for which store.
//!
//! Role-gated operations take an [`Actor`] parameter instead of relying on
//! ambient request state; the HTTP layer derives it from headers once at
//! the edge.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::store_id::StoreId;

/// Caller role, ordered from widest to narrowest privileges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Franchise-wide administrator: sees and manages every store.
    SuperAdmin,
    /// Manages exactly one store.
    StoreManager,
    /// Works at one store; read-only on its data.
    Staff,
    /// Anonymous end client booking over the phone assistant.
    Client,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "super_admin" => Ok(Self::SuperAdmin),
            "store_manager" => Ok(Self::StoreManager),
            "staff" => Ok(Self::Staff),
            "client" => Ok(Self::Client),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// The acting principal for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// Caller role.
    pub role: Role,
    /// Store the caller belongs to, when the role is store-scoped.
    pub store_id: Option<StoreId>,
}

impl Actor {
    /// An anonymous client actor.
    #[must_use]
    pub const fn client() -> Self {
        Self {
            role: Role::Client,
            store_id: None,
        }
    }

    /// A franchise-wide administrator.
    #[must_use]
    pub const fn super_admin() -> Self {
        Self {
            role: Role::SuperAdmin,
            store_id: None,
        }
    }

    /// A manager bound to `store_id`.
    #[must_use]
    pub const fn manager_of(store_id: StoreId) -> Self {
        Self {
            role: Role::StoreManager,
            store_id: Some(store_id),
        }
    }

    /// Whether this actor may write schedules for `store_id`.
    #[must_use]
    pub fn manages(&self, store_id: StoreId) -> bool {
        match self.role {
            Role::SuperAdmin => true,
            Role::StoreManager => self.store_id == Some(store_id),
            Role::Staff | Role::Client => false,
        }
    }

    /// Whether this actor may read store-scoped data for `store_id`.
    #[must_use]
    pub fn sees(&self, store_id: StoreId) -> bool {
        match self.role {
            Role::SuperAdmin => true,
            Role::StoreManager | Role::Staff => self.store_id == Some(store_id),
            Role::Client => false,
        }
    }
}
