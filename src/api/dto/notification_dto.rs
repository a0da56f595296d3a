//! Notification DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::StoreId;
use crate::notifier::{Notification, NotificationCategory};

/// One notification in list responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationDto {
    /// Notification identifier.
    pub id: uuid::Uuid,
    /// Store this notification belongs to.
    #[schema(value_type = uuid::Uuid)]
    pub store_id: StoreId,
    /// Short headline.
    pub title: String,
    /// Human-readable body.
    pub message: String,
    /// Grouping category.
    #[schema(value_type = String)]
    pub category: NotificationCategory,
    /// Read marker.
    pub is_read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationDto {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            store_id: n.store_id,
            title: n.title,
            message: n.message,
            category: n.category,
            is_read: n.is_read,
            created_at: n.created_at,
        }
    }
}

/// List response for `GET /notifications`.
#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationListResponse {
    /// Notifications visible to the actor, newest first.
    pub data: Vec<NotificationDto>,
    /// Total count.
    pub total: usize,
}
