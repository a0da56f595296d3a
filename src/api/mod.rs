//! REST API layer: route handlers, DTOs, actor extraction, and router
//! composition.
//!
//! All resource endpoints are mounted under `/api/v1`; the health check
//! lives at the root. With the `swagger-ui` feature enabled, the OpenAPI
//! document is served at `/api-docs/openapi.json` with the interactive UI
//! at `/swagger-ui`.

pub mod dto;
pub mod extract;
pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

#[cfg(feature = "swagger-ui")]
mod docs {
    use utoipa::OpenApi;

    /// OpenAPI document covering every REST endpoint.
    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "bookline-gateway",
            description = "Appointment slot generation and booking arbitration for repair-shop franchises"
        ),
        paths(
            crate::api::handlers::system::health_handler,
            crate::api::handlers::store::create_store,
            crate::api::handlers::store::list_stores,
            crate::api::handlers::store::get_store,
            crate::api::handlers::schedule::list_schedules,
            crate::api::handlers::schedule::upsert_schedule,
            crate::api::handlers::appointment::available_slots,
            crate::api::handlers::appointment::book_appointment,
            crate::api::handlers::appointment::list_appointments,
            crate::api::handlers::notification::list_notifications,
        ),
        tags(
            (name = "System", description = "Service health"),
            (name = "Stores", description = "Franchise store management"),
            (name = "Schedules", description = "Weekday operating hours"),
            (name = "Appointments", description = "Slot discovery and booking"),
            (name = "Notifications", description = "Store personnel notifications"),
        )
    )]
    pub struct ApiDoc;
}

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
    };

    router
}
