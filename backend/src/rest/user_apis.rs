//! # REST API for Users
//!
//! Endpoints for registration, authentication, and per-user balances.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use shared::{AuthenticateRequest, BalanceResponse, RegisterUserRequest};

use crate::domain::models::user::User;
use crate::rest::{error_response, mappers, AppState};

/// Register a new user.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> impl IntoResponse {
    info!("POST /api/users - email: {}", request.email);

    let user = User {
        id: None,
        name: request.name,
        email: request.email,
        password: request.password,
    };

    match state.user_service.register(user) {
        Ok(stored) => (StatusCode::CREATED, Json(mappers::user_to_dto(&stored))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Authenticate an existing user.
pub async fn authenticate(
    State(state): State<AppState>,
    Json(request): Json<AuthenticateRequest>,
) -> impl IntoResponse {
    info!("POST /api/users/authenticate - email: {}", request.email);

    match state
        .user_service
        .authenticate(&request.email, &request.password)
    {
        Ok(user) => (StatusCode::OK, Json(mappers::user_to_dto(&user))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Net balance for a user.
pub async fn balance(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    info!("GET /api/users/{}/balance", id);

    match state.user_service.lookup_by_id(id) {
        Ok(Some(_)) => match state.entry_service.balance_for_user(id) {
            Ok(balance) => (StatusCode::OK, Json(BalanceResponse { balance })).into_response(),
            Err(e) => error_response(e),
        },
        Ok(None) => (StatusCode::NOT_FOUND, "user not found").into_response(),
        Err(e) => error_response(e),
    }
}
