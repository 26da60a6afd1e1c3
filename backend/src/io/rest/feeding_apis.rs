//! # REST API for Feeding Records
//!
//! Endpoints for marking meals as fed, undoing marks, the shared daily
//! dashboard, and per-pet feeding history.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;

use crate::io::rest::{domain_error_response, CurrentUser};
use crate::AppState;
use shared::{
    DailyStatusRequest, FeedingHistoryRequest, FeedingHistoryResponse, MarkAsFedRequest,
    SuccessResponse, UnmarkAsFedRequest,
};

/// Mark one mealtime as fed on one day
pub async fn mark_as_fed(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<MarkAsFedRequest>,
) -> impl IntoResponse {
    info!("POST /api/feedings - request: {:?}", request);

    match state.feeding_service.mark_as_fed(&user_id, request).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// Remove the feeding record for one (pet, mealtime, date) triple
pub async fn unmark_as_fed(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(request): Json<UnmarkAsFedRequest>,
) -> impl IntoResponse {
    info!("DELETE /api/feedings - request: {:?}", request);

    match state.feeding_service.unmark_as_fed(request).await {
        Ok(()) => (StatusCode::OK, Json(SuccessResponse { success: true })).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// Daily feeding dashboard for the acting user's family
pub async fn get_daily_status(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Query(query): Query<DailyStatusRequest>,
) -> impl IntoResponse {
    info!("GET /api/feedings/status - date: {:?}", query.date);

    match state.feeding_service.get_daily_status(&user_id, query.date).await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// A pet's feeding history, most recent first
pub async fn get_history(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(pet_id): Path<String>,
    Query(query): Query<FeedingHistoryRequest>,
) -> impl IntoResponse {
    info!("GET /api/feedings/history/{} - limit: {:?}", pet_id, query.limit);

    match state.feeding_service.get_history(&pet_id, query.limit).await {
        Ok(records) => (StatusCode::OK, Json(FeedingHistoryResponse { records })).into_response(),
        Err(e) => domain_error_response(e),
    }
}
