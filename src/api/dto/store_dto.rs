//! Store-related DTOs for create, get, and list operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;
use crate::domain::{StoreEntry, StoreId, StoreSummary};

/// Request body for `POST /stores`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStoreRequest {
    /// Store display name.
    pub name: String,
    /// Free-form street address.
    pub location: String,
    /// Managing person, when known.
    #[serde(default)]
    pub manager_name: Option<String>,
}

/// Store detail for `POST /stores` (201) and `GET /stores/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct StoreResponse {
    /// Store identifier.
    #[schema(value_type = uuid::Uuid)]
    pub store_id: StoreId,
    /// Store display name.
    pub name: String,
    /// Free-form street address.
    pub location: String,
    /// Managing person, when known.
    pub manager_name: Option<String>,
    /// Whether the store is active.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&StoreEntry> for StoreResponse {
    fn from(entry: &StoreEntry) -> Self {
        Self {
            store_id: entry.store_id,
            name: entry.name.clone(),
            location: entry.location.clone(),
            manager_name: entry.manager_name.clone(),
            is_active: entry.is_active,
            created_at: entry.created_at,
        }
    }
}

/// Store summary for list responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct StoreSummaryDto {
    /// Store identifier.
    #[schema(value_type = uuid::Uuid)]
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

impl From<StoreSummary> for StoreSummaryDto {
    fn from(summary: StoreSummary) -> Self {
        Self {
            store_id: summary.store_id,
            name: summary.name,
            location: summary.location,
            is_active: summary.is_active,
            created_at: summary.created_at,
            schedule_days: summary.schedule_days,
            appointment_count: summary.appointment_count,
        }
    }
}

/// Paginated list response for `GET /stores`.
#[derive(Debug, Serialize, ToSchema)]
pub struct StoreListResponse {
    /// Store summaries.
    pub data: Vec<StoreSummaryDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
