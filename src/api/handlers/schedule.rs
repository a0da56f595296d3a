//! Schedule handlers: list and upsert weekday operating hours.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::api::dto::{ScheduleResponse, UpsertScheduleRequest};
use crate::api::extract::ExtractActor;
use crate::app_state::AppState;
use crate::domain::StoreId;
use crate::error::{BookingError, ErrorResponse};

/// `GET /stores/{id}/schedules` — List the store's weekday schedules.
///
/// Actors without visibility into the store get an empty list.
///
/// # Errors
///
/// Returns [`BookingError::StoreNotFound`] if the store does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/stores/{id}/schedules",
    tag = "Schedules",
    summary = "List weekday schedules",
    params(
        ("id" = uuid::Uuid, Path, description = "Store UUID"),
    ),
    responses(
        (status = 200, description = "Schedules ordered by weekday", body = [ScheduleResponse]),
        (status = 404, description = "Store not found", body = ErrorResponse),
    )
)]
pub async fn list_schedules(
    State(state): State<AppState>,
    ExtractActor(actor): ExtractActor,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, BookingError> {
    let store_id = StoreId::from_uuid(id);
    let schedules = state
        .booking_service
        .list_schedules(&actor, store_id)
        .await?;
    let body: Vec<ScheduleResponse> = schedules
        .iter()
        .map(|s| ScheduleResponse::from_schedule(store_id, s))
        .collect();
    Ok(Json(body))
}

/// `PUT /stores/{id}/schedules/{day}` — Create or replace one weekday
/// schedule.
///
/// # Errors
///
/// Returns [`BookingError::Forbidden`] when the actor does not manage the
/// store, [`BookingError::InvalidSchedule`] on constraint violations, or
/// [`BookingError::StoreNotFound`] for an unknown store.
#[utoipa::path(
    put,
    path = "/api/v1/stores/{id}/schedules/{day}",
    tag = "Schedules",
    summary = "Upsert a weekday schedule",
    description = "Replaces the operating hours for one weekday. \
        Day 0 is Monday, day 6 is Sunday.",
    params(
        ("id" = uuid::Uuid, Path, description = "Store UUID"),
        ("day" = u8, Path, description = "Weekday index, 0 = Monday .. 6 = Sunday"),
    ),
    request_body = UpsertScheduleRequest,
    responses(
        (status = 200, description = "Schedule stored", body = ScheduleResponse),
        (status = 400, description = "Invalid schedule", body = ErrorResponse),
        (status = 403, description = "Actor does not manage this store", body = ErrorResponse),
        (status = 404, description = "Store not found", body = ErrorResponse),
    )
)]
pub async fn upsert_schedule(
    State(state): State<AppState>,
    ExtractActor(actor): ExtractActor,
    Path((id, day)): Path<(uuid::Uuid, u8)>,
    Json(req): Json<UpsertScheduleRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let store_id = StoreId::from_uuid(id);
    let schedule = state
        .booking_service
        .upsert_schedule(
            &actor,
            store_id,
            day,
            req.is_open,
            req.open_time,
            req.close_time,
            req.slots_per_hour,
        )
        .await?;
    Ok(Json(ScheduleResponse::from_schedule(store_id, &schedule)))
}

/// Schedule management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stores/{id}/schedules", get(list_schedules))
        .route("/stores/{id}/schedules/{day}", put(upsert_schedule))
}
