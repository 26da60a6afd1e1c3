//! # REST API for the Current User
//!
//! Endpoints for the acting user's own profile and active-family selection.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;

use crate::io::rest::{domain_error_response, CurrentUser};
use crate::AppState;
use shared::{SuccessResponse, SwitchFamilyRequest, UpdateUserRequest};

/// Get the acting user's own account
pub async fn get_current_user(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> impl IntoResponse {
    info!("GET /api/users/me");

    match state.user_service.get_current(&user_id).await {
        Ok(Some(user)) => (StatusCode::OK, Json(user)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "User not found").into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// Update the acting user's profile
pub async fn update_current_user(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<UpdateUserRequest>,
) -> impl IntoResponse {
    info!("PUT /api/users/me - request: {:?}", request);

    match state.user_service.update_profile(&user_id, request).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// Switch the acting user's active family
pub async fn switch_family(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<SwitchFamilyRequest>,
) -> impl IntoResponse {
    info!("POST /api/users/switch-family - request: {:?}", request);

    match state.user_service.switch_family(&user_id, request).await {
        Ok(()) => (StatusCode::OK, Json(SuccessResponse { success: true })).into_response(),
        Err(e) => domain_error_response(e),
    }
}
