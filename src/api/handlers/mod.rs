//! REST endpoint handlers organized by resource.

pub mod appointment;
pub mod notification;
pub mod schedule;
pub mod store;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(store::routes())
        .merge(schedule::routes())
        .merge(appointment::routes())
        .merge(notification::routes())
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::api;
    use crate::app_state::AppState;
    use crate::domain::{EventBus, StoreRegistry};
    use crate::notifier::NotificationLog;
    use crate::service::BookingService;

    fn test_app() -> Router {
        let registry = Arc::new(StoreRegistry::new());
        let event_bus = EventBus::new(64);
        let booking_service = Arc::new(BookingService::new(registry, event_bus.clone()));
        let state = AppState {
            booking_service,
            event_bus,
            notifications: Arc::new(NotificationLog::new()),
        };
        api::build_router().with_state(state)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let Ok(collected) = response.into_body().collect().await else {
            panic!("failed to read response body");
        };
        let Ok(value) = serde_json::from_slice(&collected.to_bytes()) else {
            panic!("response body was not JSON");
        };
        value
    }

    #[tokio::test]
    async fn health_endpoint_responds() {
        let app = test_app();
        let Ok(response) = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap_or_default(),
            )
            .await
        else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn create_store_requires_super_admin() {
        let app = test_app();
        let body = serde_json::json!({
            "name": "Downtown Repairs",
            "location": "12 Main St"
        });
        let Ok(response) = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/stores")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap_or_default(),
            )
            .await
        else {
            panic!("request failed");
        };
        // No actor headers means the client role.
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], 2003);
    }

    #[tokio::test]
    async fn store_lifecycle_over_http() {
        let app = test_app();

        let body = serde_json::json!({
            "name": "Downtown Repairs",
            "location": "12 Main St",
            "manager_name": "Kim"
        });
        let Ok(response) = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/stores")
                    .header("x-actor-role", "super_admin")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap_or_default(),
            )
            .await
        else {
            panic!("create request failed");
        };
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        let Some(id) = created["store_id"].as_str() else {
            panic!("create response had no store id");
        };

        let Ok(response) = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/stores/{id}"))
                    .body(Body::empty())
                    .unwrap_or_default(),
            )
            .await
        else {
            panic!("get request failed");
        };
        assert_eq!(response.status(), StatusCode::OK);
        let fetched = body_json(response).await;
        assert_eq!(fetched["name"], "Downtown Repairs");

        let Ok(response) = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/stores")
                    .body(Body::empty())
                    .unwrap_or_default(),
            )
            .await
        else {
            panic!("list request failed");
        };
        let listed = body_json(response).await;
        assert_eq!(listed["pagination"]["total"], 1);
    }

    #[tokio::test]
    async fn pagination_far_past_the_end_is_empty_not_an_error() {
        let app = test_app();
        let Ok(response) = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/stores?page=4294967295&per_page=100")
                    .body(Body::empty())
                    .unwrap_or_default(),
            )
            .await
        else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["data"].as_array().is_some_and(Vec::is_empty));
        assert_eq!(json["pagination"]["total"], 0);
    }

    #[tokio::test]
    async fn unknown_store_returns_404_shape() {
        let app = test_app();
        let Ok(response) = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/stores/{}", uuid::Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap_or_default(),
            )
            .await
        else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], 2001);
    }

    #[tokio::test]
    async fn booking_flow_over_http() {
        let app = test_app();

        let body = serde_json::json!({ "name": "Harbor Repairs", "location": "Pier 4" });
        let Ok(response) = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/stores")
                    .header("x-actor-role", "super_admin")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap_or_default(),
            )
            .await
        else {
            panic!("create store failed");
        };
        let created = body_json(response).await;
        let Some(id) = created["store_id"].as_str() else {
            panic!("create response had no store id");
        };

        // 2026-08-24 is a Monday, weekday 0.
        let schedule = serde_json::json!({
            "open_time": "09:00:00",
            "close_time": "11:00:00",
            "slots_per_hour": 2
        });
        let Ok(response) = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/api/v1/stores/{id}/schedules/0"))
                    .header("x-actor-role", "super_admin")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(schedule.to_string()))
                    .unwrap_or_default(),
            )
            .await
        else {
            panic!("upsert schedule failed");
        };
        assert_eq!(response.status(), StatusCode::OK);

        let Ok(response) = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!(
                        "/api/v1/stores/{id}/available-slots?date=2026-08-24"
                    ))
                    .body(Body::empty())
                    .unwrap_or_default(),
            )
            .await
        else {
            panic!("slot query failed");
        };
        assert_eq!(response.status(), StatusCode::OK);
        let slots = body_json(response).await;
        let Some(slots) = slots.as_array() else {
            panic!("slots response was not an array");
        };
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[0]["serial_no"], 1);

        let booking = serde_json::json!({
            "store_id": id,
            "date": "2026-08-24",
            "start_time": "09:30:00",
            "client_name": "Ana",
            "client_email": "ana@example.com",
            "client_phone": "555-0100",
            "repair_type": "screen",
            "category": "phone",
            "brand": "Acme",
            "device_model": "A1"
        });
        let Ok(response) = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/appointments")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(booking.to_string()))
                    .unwrap_or_default(),
            )
            .await
        else {
            panic!("booking failed");
        };
        assert_eq!(response.status(), StatusCode::CREATED);
        let appointment = body_json(response).await;
        assert_eq!(appointment["serial_no"], 2);
        assert_eq!(appointment["start_time"], "09:30:00");
        assert_eq!(appointment["end_time"], "10:00:00");

        // Same slot again is unavailable.
        let rebooking = serde_json::json!({
            "store_id": id,
            "date": "2026-08-24",
            "start_time": "09:30:00",
            "client_name": "Bo",
            "client_email": "bo@example.com",
            "client_phone": "555-0101",
            "repair_type": "battery",
            "category": "phone",
            "brand": "Acme",
            "device_model": "A2"
        });
        let Ok(response) = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/appointments")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(rebooking.to_string()))
                    .unwrap_or_default(),
            )
            .await
        else {
            panic!("second booking failed");
        };
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], 4002);
    }
}
