//! Appointment handlers: slot discovery, booking, listing.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    AppointmentListParams, AppointmentListResponse, AppointmentResponse, BookAppointmentRequest,
    SlotDto, SlotQuery,
};
use crate::api::extract::ExtractActor;
use crate::app_state::AppState;
use crate::domain::{BookingRequest, StoreId};
use crate::error::{BookingError, ErrorResponse};

/// `GET /stores/{id}/available-slots` — Compute the free slots for a date.
///
/// Slots are recomputed on every call; the list reflects the schedule and
/// bookings at read time. A closed or unscheduled day yields an empty list
/// with status 200.
///
/// # Errors
///
/// Returns [`BookingError::StoreNotFound`] if the store does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/stores/{id}/available-slots",
    tag = "Appointments",
    summary = "List available slots",
    description = "Returns the bookable windows for one date, with stable \
        wall-clock serial numbers. Defaults to the current date.",
    params(
        ("id" = uuid::Uuid, Path, description = "Store UUID"),
        SlotQuery,
    ),
    responses(
        (status = 200, description = "Available slots in start-time order", body = [SlotDto]),
        (status = 404, description = "Store not found", body = ErrorResponse),
    )
)]
pub async fn available_slots(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Query(query): Query<SlotQuery>,
) -> Result<impl IntoResponse, BookingError> {
    let store_id = StoreId::from_uuid(id);
    let date = query.date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let slots = state.booking_service.available_slots(store_id, date).await?;
    let body: Vec<SlotDto> = slots.into_iter().map(SlotDto::from).collect();
    Ok(Json(body))
}

/// `POST /appointments` — Book an appointment.
///
/// With `start_time` set, only that exact slot is accepted; without it,
/// the earliest available slot is assigned.
///
/// # Errors
///
/// Returns [`BookingError::NoAvailability`] when the day has no free
/// slots, [`BookingError::SlotUnavailable`] when the requested time is
/// not offered, [`BookingError::StorageConflict`] on a lost booking race,
/// [`BookingError::InvalidRequest`] on malformed fields, or
/// [`BookingError::StoreNotFound`] for an unknown store.
#[utoipa::path(
    post,
    path = "/api/v1/appointments",
    tag = "Appointments",
    summary = "Book an appointment",
    description = "Arbitrates one booking: the requested slot must be \
        offered verbatim, otherwise the earliest free slot is chosen when \
        no start time is given.",
    request_body = BookAppointmentRequest,
    responses(
        (status = 201, description = "Appointment booked", body = AppointmentResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Store not found", body = ErrorResponse),
        (status = 409, description = "Lost a concurrent booking race", body = ErrorResponse),
        (status = 422, description = "No availability or slot taken", body = ErrorResponse),
    )
)]
pub async fn book_appointment(
    State(state): State<AppState>,
    Json(req): Json<BookAppointmentRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let appointment = state
        .booking_service
        .book(BookingRequest::from(req))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(AppointmentResponse::from(appointment)),
    ))
}

/// `GET /appointments` — List appointments visible to the actor.
///
/// Super-admins see every store; managers and staff see their own store;
/// clients get an empty list.
#[utoipa::path(
    get,
    path = "/api/v1/appointments",
    tag = "Appointments",
    summary = "List appointments",
    params(AppointmentListParams),
    responses(
        (status = 200, description = "Appointments visible to the actor", body = AppointmentListResponse),
    )
)]
pub async fn list_appointments(
    State(state): State<AppState>,
    ExtractActor(actor): ExtractActor,
    Query(params): Query<AppointmentListParams>,
) -> impl IntoResponse {
    let appointments = state
        .booking_service
        .list_appointments(&actor, params.date)
        .await;
    let data: Vec<AppointmentResponse> = appointments
        .into_iter()
        .map(AppointmentResponse::from)
        .collect();
    let total = data.len();
    Json(AppointmentListResponse { data, total })
}

/// Appointment and slot routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stores/{id}/available-slots", get(available_slots))
        .route(
            "/appointments",
            axum::routing::post(book_appointment).get(list_appointments),
        )
}
