//! # Storage Module
//!
//! Handles all data persistence for the feeding tracker.
//!
//! The domain layer depends on the storage traits only; the concrete
//! backend (a JSON-document filesystem store) can be swapped without
//! touching business logic.

pub mod json;
pub mod traits;

pub use json::{FamilyRepository, FeedingRepository, JsonConnection, PetRepository, UserRepository};
pub use traits::{FamilyStorage, FeedingStorage, PetStorage, UserStorage};
