//! Actor extraction at the HTTP edge.
//!
//! The acting principal is carried in two headers and threaded through
//! handlers as an explicit [`Actor`] parameter; no ambient request state
//! leaks past this boundary. Missing headers default to an anonymous
//! client, which is sufficient for the public booking endpoints.

use std::str::FromStr;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::{Actor, Role, StoreId};
use crate::error::BookingError;

/// Header naming the caller role (`super_admin`, `store_manager`,
/// `staff`, `client`).
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

/// Header carrying the caller's store UUID for store-scoped roles.
pub const ACTOR_STORE_HEADER: &str = "x-actor-store";

/// Axum extractor producing the request [`Actor`] from headers.
#[derive(Debug, Clone, Copy)]
pub struct ExtractActor(pub Actor);

impl<S> FromRequestParts<S> for ExtractActor
where
    S: Send + Sync,
{
    type Rejection = BookingError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let role = match parts.headers.get(ACTOR_ROLE_HEADER) {
            Some(value) => {
                let text = value.to_str().map_err(|_| {
                    BookingError::InvalidRequest(format!("{ACTOR_ROLE_HEADER} is not valid UTF-8"))
                })?;
                Role::from_str(text).map_err(BookingError::InvalidRequest)?
            }
            None => Role::Client,
        };

        let store_id = match parts.headers.get(ACTOR_STORE_HEADER) {
            Some(value) => {
                let text = value.to_str().map_err(|_| {
                    BookingError::InvalidRequest(format!("{ACTOR_STORE_HEADER} is not valid UTF-8"))
                })?;
                let uuid = uuid::Uuid::parse_str(text).map_err(|_| {
                    BookingError::InvalidRequest(format!("{ACTOR_STORE_HEADER} is not a UUID"))
                })?;
                Some(StoreId::from_uuid(uuid))
            }
            None => None,
        };

        Ok(Self(Actor { role, store_id }))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<Actor, BookingError> {
        let (mut parts, ()) = request.into_parts();
        ExtractActor::from_request_parts(&mut parts, &())
            .await
            .map(|e| e.0)
    }

    #[tokio::test]
    async fn missing_headers_default_to_client() {
        let Ok(request) = Request::builder().uri("/").body(()) else {
            panic!("request build failed");
        };
        let Ok(actor) = extract(request).await else {
            panic!("extraction failed");
        };
        assert_eq!(actor.role, Role::Client);
        assert!(actor.store_id.is_none());
    }

    #[tokio::test]
    async fn role_and_store_headers_are_parsed() {
        let store = uuid::Uuid::new_v4();
        let Ok(request) = Request::builder()
            .uri("/")
            .header(ACTOR_ROLE_HEADER, "store_manager")
            .header(ACTOR_STORE_HEADER, store.to_string())
            .body(())
        else {
            panic!("request build failed");
        };
        let Ok(actor) = extract(request).await else {
            panic!("extraction failed");
        };
        assert_eq!(actor.role, Role::StoreManager);
        assert_eq!(actor.store_id, Some(StoreId::from_uuid(store)));
    }

    #[tokio::test]
    async fn unknown_role_is_rejected() {
        let Ok(request) = Request::builder()
            .uri("/")
            .header(ACTOR_ROLE_HEADER, "intern")
            .body(())
        else {
            panic!("request build failed");
        };
        assert!(extract(request).await.is_err());
    }
}
