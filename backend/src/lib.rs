//! # Backend Module
//!
//! Contains all non-UI logic for the pet feeding tracker.
//!
//! This module is the orchestration layer that brings together:
//! - **Domain**: Business rules for pets, families, and feeding records
//! - **Storage**: Data persistence (JSON documents on the file system)
//! - **IO**: Interface layer that exposes functionality over HTTP
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! Clients (web frontend, CLI)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (Business logic, services)
//!     ↓
//! Storage Layer (JSON document store)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Initialize and configure the application state
//! - Set up the REST API router with CORS configuration
//! - Coordinate between domain logic and data persistence

pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::domain::{FamilyService, FeedingService, PetService, UserService};
use crate::storage::json::{
    FamilyRepository, FeedingRepository, JsonConnection, PetRepository, UserRepository,
};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub pet_service: PetService,
    pub feeding_service: FeedingService,
    pub family_service: FamilyService,
    pub user_service: UserService,
}

/// Initialize the backend with all required services
pub fn initialize_backend(connection: JsonConnection) -> Result<AppState> {
    info!("Setting up repositories");
    let pets = Arc::new(PetRepository::new(connection.clone()));
    let feedings = Arc::new(FeedingRepository::new(connection.clone()));
    let families = Arc::new(FamilyRepository::new(connection.clone()));
    let users = Arc::new(UserRepository::new(connection));

    info!("Setting up domain model");
    let pet_service = PetService::new(pets.clone(), feedings.clone(), users.clone());
    let feeding_service =
        FeedingService::new(pets, feedings, families.clone(), users.clone());
    let family_service = FamilyService::new(families, users.clone());
    let user_service = UserService::new(users);

    Ok(AppState {
        pet_service,
        feeding_service,
        family_service,
        user_service,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Set up our application routes
    let api_routes = Router::new()
        .route("/pets", get(io::list_pets).post(io::create_pet))
        .route(
            "/pets/:pet_id",
            get(io::get_pet).put(io::update_pet).delete(io::delete_pet),
        )
        .route("/feedings", post(io::mark_as_fed).delete(io::unmark_as_fed))
        .route("/feedings/status", get(io::get_daily_status))
        .route("/feedings/history/:pet_id", get(io::get_history))
        .route("/families", get(io::list_families).post(io::create_family))
        .route("/families/mine", get(io::get_active_family))
        .route("/families/members", get(io::list_members))
        .route("/families/join", post(io::join_family))
        .route("/users/me", get(io::get_current_user).put(io::update_current_user))
        .route("/users/switch-family", post(io::switch_family));

    // Define our main application router
    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
