//! HTTP adapter: axum router, application state, and the error→status
//! mapping shared by the handlers.

pub mod entry_apis;
pub mod mappers;
pub mod user_apis;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use tracing::error;

use crate::domain::errors::DomainError;
use crate::domain::{EntryService, UserService};
use crate::storage::csv::CsvConnection;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub entry_service: EntryService,
}

impl AppState {
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self {
            user_service: UserService::new(connection.clone()),
            entry_service: EntryService::new(connection),
        }
    }
}

/// Build the API router.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/users", post(user_apis::register))
        .route("/api/users/authenticate", post(user_apis::authenticate))
        .route("/api/users/:id/balance", get(user_apis::balance))
        .route(
            "/api/entries",
            post(entry_apis::create_entry).get(entry_apis::search_entries),
        )
        .route(
            "/api/entries/:id",
            put(entry_apis::update_entry).delete(entry_apis::delete_entry),
        )
        .route(
            "/api/entries/:id/status",
            put(entry_apis::update_entry_status),
        )
        .with_state(state)
}

/// Map a domain error to a response: business failures are 400 with the
/// message verbatim; misuse and storage failures are 500 with no detail.
pub(crate) fn error_response(err: DomainError) -> Response {
    match err {
        DomainError::Validation(msg)
        | DomainError::BusinessRule(msg)
        | DomainError::Authentication(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
        other => {
            error!("request failed: {}", other);
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn setup_router() -> (Router, tempfile::TempDir) {
        let temp_dir = tempfile::tempdir().unwrap();
        let conn = Arc::new(CsvConnection::new(temp_dir.path()).unwrap());
        (api_router(AppState::new(conn)), temp_dir)
    }

    #[tokio::test]
    async fn test_register_and_authenticate_through_the_router() {
        let (router, _temp_dir) = setup_router();

        let body = serde_json::json!({
            "name": "Maria",
            "email": "maria@example.com",
            "password": "secret"
        });
        let request = Request::builder()
            .method("POST")
            .uri("/api/users")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = serde_json::json!({
            "email": "maria@example.com",
            "password": "secret"
        });
        let request = Request::builder()
            .method("POST")
            .uri("/api/users/authenticate")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_search_with_an_unknown_user_is_bad_request() {
        let (router, _temp_dir) = setup_router();

        let request = Request::builder()
            .uri("/api/entries?user=42")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
