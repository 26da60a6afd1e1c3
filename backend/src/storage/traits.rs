//! # Storage Traits
//!
//! Storage abstraction traits that allow different document-store backends
//! to be used interchangeably by the domain layer.

use anyhow::Result;
use async_trait::async_trait;
use shared::{Family, FeedingRecord, Pet, User};

/// Trait defining the interface for pet storage operations
#[async_trait]
pub trait PetStorage: Send + Sync {
    /// Store a new pet
    async fn store_pet(&self, pet: &Pet) -> Result<()>;

    /// Retrieve a specific pet by ID
    async fn get_pet(&self, pet_id: &str) -> Result<Option<Pet>>;

    /// List all pets owned by a family, newest first
    async fn list_pets_by_family(&self, family_id: &str) -> Result<Vec<Pet>>;

    /// Update an existing pet
    async fn update_pet(&self, pet: &Pet) -> Result<()>;

    /// Delete a pet by ID
    /// Returns true if the pet was found and deleted, false otherwise
    async fn delete_pet(&self, pet_id: &str) -> Result<bool>;
}

/// Trait defining the interface for feeding record storage operations
///
/// Record IDs are deterministic keys over the (pet, mealtime, date) triple,
/// so `create_record` doubles as the at-most-one-record guard.
#[async_trait]
pub trait FeedingStorage: Send + Sync {
    /// Store a new feeding record only if no record with its ID exists.
    /// Returns false when a record for the same key is already present.
    async fn create_record(&self, record: &FeedingRecord) -> Result<bool>;

    /// Retrieve a specific feeding record by ID
    async fn get_record(&self, record_id: &str) -> Result<Option<FeedingRecord>>;

    /// Delete a feeding record by ID
    /// Returns true if the record was found and deleted, false otherwise
    async fn delete_record(&self, record_id: &str) -> Result<bool>;

    /// List all feeding records whose date field equals the given date
    async fn list_records_for_date(&self, date: &str) -> Result<Vec<FeedingRecord>>;

    /// List a pet's feeding records ordered by fed_at descending
    async fn list_records_for_pet(&self, pet_id: &str, limit: u32) -> Result<Vec<FeedingRecord>>;

    /// Delete all feeding records belonging to a pet (cascade on pet deletion)
    /// Returns the number of records deleted
    async fn delete_records_for_pet(&self, pet_id: &str) -> Result<u32>;
}

/// Trait defining the interface for family storage operations
#[async_trait]
pub trait FamilyStorage: Send + Sync {
    /// Store a new family
    async fn store_family(&self, family: &Family) -> Result<()>;

    /// Retrieve a specific family by ID
    async fn get_family(&self, family_id: &str) -> Result<Option<Family>>;

    /// Update an existing family
    async fn update_family(&self, family: &Family) -> Result<()>;
}

/// Trait defining the interface for user storage operations
///
/// User documents are created by the upstream session layer; the tracker
/// reads them for membership resolution and updates profile and family
/// membership fields.
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Store a new user
    async fn store_user(&self, user: &User) -> Result<()>;

    /// Retrieve a specific user by ID
    async fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    /// Update an existing user
    async fn update_user(&self, user: &User) -> Result<()>;
}
