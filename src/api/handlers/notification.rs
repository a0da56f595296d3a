//! Notification handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{NotificationDto, NotificationListResponse};
use crate::api::extract::ExtractActor;
use crate::app_state::AppState;

/// `GET /notifications` — List notifications visible to the actor,
/// newest first.
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    tag = "Notifications",
    summary = "List notifications",
    description = "Super-admins see every store's notifications; managers \
        and staff see their own store; clients get an empty list.",
    responses(
        (status = 200, description = "Notifications, newest first", body = NotificationListResponse),
    )
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    ExtractActor(actor): ExtractActor,
) -> impl IntoResponse {
    let data: Vec<NotificationDto> = state
        .notifications
        .visible_to(&actor)
        .await
        .into_iter()
        .map(NotificationDto::from)
        .collect();
    let total = data.len();
    Json(NotificationListResponse { data, total })
}

/// Notification routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/notifications", get(list_notifications))
}
