//! # REST API for Entries
//!
//! Endpoints for creating, updating, deleting, and searching entries, plus
//! the dedicated status-change endpoint.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::info;

use shared::{EntryRequest, UpdateStatusRequest};

use crate::domain::models::entry::{Entry, EntryFilter, EntryStatus};
use crate::rest::{error_response, mappers, AppState};

/// Query parameters for the entry search API.
#[derive(Debug, Deserialize)]
pub struct EntrySearchQuery {
    pub description: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    /// Owner id; required, and must resolve to a registered user.
    pub user: Option<i64>,
}

/// Create a new entry. The stored entry always starts out PENDING.
pub async fn create_entry(
    State(state): State<AppState>,
    Json(request): Json<EntryRequest>,
) -> impl IntoResponse {
    info!("POST /api/entries - request: {:?}", request);

    let entry = match mappers::entry_from_request(&request, &state.user_service) {
        Ok(entry) => entry,
        Err(e) => return error_response(e),
    };

    match state.entry_service.create(entry) {
        Ok(stored) => (StatusCode::CREATED, Json(mappers::entry_to_dto(&stored))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Replace an existing entry. The id and registration date of the stored
/// row are carried over; everything else comes from the payload.
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<EntryRequest>,
) -> impl IntoResponse {
    info!("PUT /api/entries/{} - request: {:?}", id, request);

    let existing = match state.entry_service.find_by_id(id) {
        Ok(Some(existing)) => existing,
        Ok(None) => return (StatusCode::BAD_REQUEST, "entry not found").into_response(),
        Err(e) => return error_response(e),
    };

    let entry = match mappers::entry_from_request(&request, &state.user_service) {
        Ok(entry) => entry,
        Err(e) => return error_response(e),
    };
    let entry = Entry {
        id: existing.id,
        created_at: existing.created_at,
        ..entry
    };

    match state.entry_service.update(entry) {
        Ok(stored) => (StatusCode::OK, Json(mappers::entry_to_dto(&stored))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Delete an entry by id.
pub async fn delete_entry(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    info!("DELETE /api/entries/{}", id);

    let existing = match state.entry_service.find_by_id(id) {
        Ok(Some(existing)) => existing,
        Ok(None) => return (StatusCode::BAD_REQUEST, "entry not found").into_response(),
        Err(e) => return error_response(e),
    };

    match state.entry_service.delete(&existing) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

/// Search entries by example. The owner is required; the remaining
/// parameters are optional filters.
pub async fn search_entries(
    State(state): State<AppState>,
    Query(query): Query<EntrySearchQuery>,
) -> impl IntoResponse {
    info!("GET /api/entries - query: {:?}", query);

    let user = match query.user {
        Some(id) => match state.user_service.lookup_by_id(id) {
            Ok(user) => user,
            Err(e) => return error_response(e),
        },
        None => None,
    };
    let Some(user) = user else {
        return (
            StatusCode::BAD_REQUEST,
            "could not run the search: user not found",
        )
            .into_response();
    };

    let filter = EntryFilter {
        description: query.description,
        month: query.month,
        year: query.year,
        user_id: user.id,
    };

    match state.entry_service.search(&filter) {
        Ok(entries) => {
            let dtos: Vec<_> = entries.iter().map(mappers::entry_to_dto).collect();
            (StatusCode::OK, Json(dtos)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Change the status of an entry. Runs the full update path, so an entry
/// with other invalid fields fails here too.
pub async fn update_entry_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> impl IntoResponse {
    info!("PUT /api/entries/{}/status - request: {:?}", id, request);

    let Ok(status) = request.status.parse::<EntryStatus>() else {
        return (StatusCode::BAD_REQUEST, "could not update entry status").into_response();
    };

    let existing = match state.entry_service.find_by_id(id) {
        Ok(Some(existing)) => existing,
        Ok(None) => return (StatusCode::BAD_REQUEST, "entry not found").into_response(),
        Err(e) => return error_response(e),
    };

    match state.entry_service.set_status(existing, status) {
        Ok(stored) => (StatusCode::OK, Json(mappers::entry_to_dto(&stored))).into_response(),
        Err(e) => error_response(e),
    }
}
