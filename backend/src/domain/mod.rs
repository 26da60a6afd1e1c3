//! # Domain Module
//!
//! Business logic for the feeding tracker, independent of any transport or
//! storage implementation.
//!
//! ## Module Organization
//!
//! - **status**: pure aggregation of the per-pet, per-mealtime daily view
//! - **feeding_service**: mark/unmark mutations and dashboard reads
//! - **pet_service**: pet CRUD, including the feeding-record cascade on delete
//! - **family_service**: family creation, joining, and member listing
//! - **user_service**: profile updates and active-family switching
//! - **membership**: resolving which family a user is acting in
//!
//! ## Core Rules
//!
//! - At most one feeding record exists per (pet, mealtime, date) triple;
//!   the record's identity is derived from the triple so the store itself
//!   rejects duplicates
//! - Marking never overwrites an existing record's feeder or notes
//! - Any family member may unmark any member's feeding entry
//! - The daily status is recomputed from current state on every read
//! - Every operation takes the acting user explicitly; there is no ambient
//!   session state

pub mod errors;
pub mod family_service;
pub mod feeding_service;
pub mod membership;
pub mod pet_service;
pub mod status;
pub mod user_service;

pub use errors::{DomainError, DomainResult};
pub use family_service::FamilyService;
pub use feeding_service::FeedingService;
pub use pet_service::PetService;
pub use user_service::UserService;

/// Trim an optional string field, treating empty input as absent.
/// Keeps the wire-level "absent vs empty string" distinction out of
/// persisted documents.
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
