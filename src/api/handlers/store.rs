//! Store handlers: create, list, get.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    CreateStoreRequest, PaginationMeta, PaginationParams, StoreListResponse, StoreResponse,
    StoreSummaryDto,
};
use crate::api::extract::ExtractActor;
use crate::app_state::AppState;
use crate::domain::StoreId;
use crate::error::{BookingError, ErrorResponse};

/// `POST /stores` — Register a new store.
///
/// # Errors
///
/// Returns [`BookingError::Forbidden`] unless the actor is a super-admin,
/// or [`BookingError::InvalidRequest`] on missing fields.
#[utoipa::path(
    post,
    path = "/api/v1/stores",
    tag = "Stores",
    summary = "Create a new store",
    description = "Registers a franchise store. Requires the super_admin role.",
    request_body = CreateStoreRequest,
    responses(
        (status = 201, description = "Store created successfully", body = StoreResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Actor may not create stores", body = ErrorResponse),
    )
)]
pub async fn create_store(
    State(state): State<AppState>,
    ExtractActor(actor): ExtractActor,
    Json(req): Json<CreateStoreRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let store_id = state
        .booking_service
        .create_store(&actor, &req.name, &req.location, req.manager_name)
        .await?;

    let entry_lock = state.booking_service.registry().get(store_id).await?;
    let entry = entry_lock.read().await;
    let response = StoreResponse::from(&*entry);

    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /stores` — List all stores with pagination.
///
/// # Errors
///
/// Returns [`BookingError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/stores",
    tag = "Stores",
    summary = "List stores",
    description = "Returns a paginated list of all registered stores.",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated store list", body = StoreListResponse),
    )
)]
pub async fn list_stores(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, BookingError> {
    let params = params.clamped();
    let summaries = state.booking_service.list_stores().await;

    let total = u32::try_from(summaries.len()).unwrap_or(u32::MAX);
    let per_page = params.per_page;
    let page = params.page;
    let total_pages = if total == 0 {
        0
    } else {
        total.div_ceil(per_page)
    };

    // Widen before multiplying: page and per_page are caller-controlled.
    let start = usize::try_from(u64::from(page - 1) * u64::from(per_page)).unwrap_or(usize::MAX);
    let data: Vec<StoreSummaryDto> = summaries
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .map(StoreSummaryDto::from)
        .collect();

    Ok(Json(StoreListResponse {
        data,
        pagination: PaginationMeta {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

/// `GET /stores/{id}` — Get store details.
///
/// # Errors
///
/// Returns [`BookingError::StoreNotFound`] if the store does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/stores/{id}",
    tag = "Stores",
    summary = "Get store details",
    params(
        ("id" = uuid::Uuid, Path, description = "Store UUID"),
    ),
    responses(
        (status = 200, description = "Store details", body = StoreResponse),
        (status = 404, description = "Store not found", body = ErrorResponse),
    )
)]
pub async fn get_store(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, BookingError> {
    let store_id = StoreId::from_uuid(id);
    let entry_lock = state.booking_service.registry().get(store_id).await?;
    let entry = entry_lock.read().await;
    Ok(Json(StoreResponse::from(&*entry)))
}

/// Store management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stores", post(create_store).get(list_stores))
        .route("/stores/{id}", get(get_store))
}
