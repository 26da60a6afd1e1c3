//! # REST API for Family Management
//!
//! Endpoints for creating and joining families and listing members.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;

use crate::io::rest::{domain_error_response, CurrentUser};
use crate::AppState;
use shared::{CreateFamilyRequest, JoinFamilyRequest, SuccessResponse};

/// Create a new family with the acting user as its first member
pub async fn create_family(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<CreateFamilyRequest>,
) -> impl IntoResponse {
    info!("POST /api/families - request: {:?}", request);

    match state.family_service.create_family(&user_id, request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// List every family the acting user belongs to
pub async fn list_families(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> impl IntoResponse {
    info!("GET /api/families");

    match state.family_service.list_families(&user_id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// The acting user's active family
pub async fn get_active_family(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> impl IntoResponse {
    info!("GET /api/families/mine");

    match state.family_service.get_active_family(&user_id).await {
        Ok(Some(family)) => (StatusCode::OK, Json(family)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "No active family").into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// List the members of the acting user's active family
pub async fn list_members(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> impl IntoResponse {
    info!("GET /api/families/members");

    match state.family_service.list_members(&user_id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// Join an existing family
pub async fn join_family(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<JoinFamilyRequest>,
) -> impl IntoResponse {
    info!("POST /api/families/join - request: {:?}", request);

    match state.family_service.join_family(&user_id, request).await {
        Ok(()) => (StatusCode::OK, Json(SuccessResponse { success: true })).into_response(),
        Err(e) => domain_error_response(e),
    }
}
