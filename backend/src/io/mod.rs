//! # IO Module
//!
//! Interface layer between clients and the domain logic.
//!
//! This module translates HTTP requests into domain operations and formats
//! domain responses for clients. It owns the communication protocol
//! (REST API), serialization, and the boundary between the transport and
//! business logic.
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: Exposing REST endpoints for frontend consumption
//! - **Identity Extraction**: Pulling the acting user out of each request
//! - **Error Translation**: Converting domain errors to HTTP status codes
//! - **Data Serialization**: Converting between JSON and domain objects
//!
//! ## Current Implementation
//!
//! - **Web Framework**: Axum for async HTTP handling
//! - **Serialization**: Serde for JSON serialization/deserialization
//! - **State Management**: Axum extractors for dependency injection

pub mod rest;

pub use rest::family_apis::*;
pub use rest::feeding_apis::*;
pub use rest::pet_apis::*;
pub use rest::user_apis::*;
