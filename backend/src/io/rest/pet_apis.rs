//! # REST API for Pet Management
//!
//! Endpoints for creating, retrieving, updating, and deleting pets.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;

use crate::io::rest::{domain_error_response, CurrentUser};
use crate::AppState;
use shared::{CreatePetRequest, UpdatePetRequest};

/// Create a new pet in the acting user's family
pub async fn create_pet(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<CreatePetRequest>,
) -> impl IntoResponse {
    info!("POST /api/pets - request: {:?}", request);

    match state.pet_service.create_pet(&user_id, request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// Get a pet by ID
pub async fn get_pet(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(pet_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/pets/{}", pet_id);

    match state.pet_service.get_pet(&pet_id).await {
        Ok(pet) => (StatusCode::OK, Json(pet)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// List the acting user's family's pets, newest first
pub async fn list_pets(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> impl IntoResponse {
    info!("GET /api/pets");

    match state.pet_service.list_pets(&user_id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// Update a pet; absent request fields are left unchanged
pub async fn update_pet(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(pet_id): Path<String>,
    Json(request): Json<UpdatePetRequest>,
) -> impl IntoResponse {
    info!("PUT /api/pets/{} - request: {:?}", pet_id, request);

    match state.pet_service.update_pet(&pet_id, request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// Delete a pet and its feeding records
pub async fn delete_pet(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(pet_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/pets/{}", pet_id);

    match state.pet_service.delete_pet(&pet_id).await {
        Ok(()) => (StatusCode::NO_CONTENT, "").into_response(),
        Err(e) => domain_error_response(e),
    }
}
