//! # REST API Interface Layer
//!
//! HTTP endpoints for the feeding tracker. This layer handles
//! request/response serialization, translation of domain errors to HTTP
//! status codes, and extraction of the acting user's identity.
//!
//! Session issuance lives upstream; the authenticated user ID arrives in
//! the `X-User-Id` header, and every domain call receives it explicitly.

pub mod family_apis;
pub mod feeding_apis;
pub mod pet_apis;
pub mod user_apis;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use log::error;

use crate::domain::DomainError;

/// The acting user, taken from the `X-User-Id` header set by the upstream
/// session layer. Requests without it are rejected before reaching the
/// domain.
pub struct CurrentUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .filter(|id| !id.is_empty())
            .map(|id| CurrentUser(id.to_string()))
            .ok_or((StatusCode::UNAUTHORIZED, "Missing X-User-Id header".to_string()))
    }
}

/// Map a domain error onto an HTTP response
pub(crate) fn domain_error_response(err: DomainError) -> Response {
    let status = match &err {
        DomainError::AlreadyFed => StatusCode::CONFLICT,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::NotAMember => StatusCode::FORBIDDEN,
        DomainError::Invalid(_) => StatusCode::BAD_REQUEST,
        DomainError::Storage(e) => {
            error!("Storage failure: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, err.to_string()).into_response()
}
