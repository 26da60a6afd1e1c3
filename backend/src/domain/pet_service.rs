use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveTime, Utc};
use log::{info, warn};
use shared::{CreatePetRequest, Mealtime, Pet, PetListResponse, PetResponse, UpdatePetRequest};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::membership;
use crate::storage::traits::{FeedingStorage, PetStorage, UserStorage};

const MAX_NAME_LENGTH: usize = 100;

/// Service for managing pets and their mealtime lists
#[derive(Clone)]
pub struct PetService {
    pets: Arc<dyn PetStorage>,
    feedings: Arc<dyn FeedingStorage>,
    users: Arc<dyn UserStorage>,
}

impl PetService {
    pub fn new(
        pets: Arc<dyn PetStorage>,
        feedings: Arc<dyn FeedingStorage>,
        users: Arc<dyn UserStorage>,
    ) -> Self {
        Self { pets, feedings, users }
    }

    /// Create a new pet in the acting user's family
    pub async fn create_pet(
        &self,
        acting_user_id: &str,
        request: CreatePetRequest,
    ) -> DomainResult<PetResponse> {
        info!("Creating pet: name={}, type={}", request.name, request.pet_type);

        let family_id = membership::resolve_active_family(self.users.as_ref(), acting_user_id)
            .await?
            .ok_or_else(|| DomainError::invalid("User must belong to a family to create pets"))?;

        validate_name(&request.name, "Pet name")?;
        validate_name(&request.pet_type, "Pet type")?;
        validate_mealtimes(&request.mealtimes)?;

        let now = Utc::now();
        let pet = Pet {
            id: Pet::generate_id(now.timestamp_millis() as u64),
            name: request.name.trim().to_string(),
            pet_type: request.pet_type.trim().to_string(),
            image_url: crate::domain::normalize_optional(request.image_url),
            family_id,
            mealtimes: request.mealtimes,
            created_at: now.to_rfc3339(),
        };

        self.pets.store_pet(&pet).await?;

        info!("Created pet {} with ID {}", pet.name, pet.id);

        Ok(PetResponse {
            pet,
            success_message: "Pet created successfully".to_string(),
        })
    }

    /// Get a pet by ID
    pub async fn get_pet(&self, pet_id: &str) -> DomainResult<Pet> {
        self.pets
            .get_pet(pet_id)
            .await?
            .ok_or(DomainError::NotFound("Pet"))
    }

    /// List the acting user's family's pets, newest first.
    /// Users without a family get an empty list.
    pub async fn list_pets(&self, acting_user_id: &str) -> DomainResult<PetListResponse> {
        let family_id = match membership::resolve_active_family(self.users.as_ref(), acting_user_id).await? {
            Some(id) => id,
            None => return Ok(PetListResponse { pets: Vec::new() }),
        };

        let pets = self.pets.list_pets_by_family(&family_id).await?;
        Ok(PetListResponse { pets })
    }

    /// Update an existing pet; absent request fields are left unchanged
    pub async fn update_pet(&self, pet_id: &str, request: UpdatePetRequest) -> DomainResult<PetResponse> {
        info!("Updating pet {}", pet_id);

        let mut pet = self.get_pet(pet_id).await?;

        if let Some(name) = request.name {
            validate_name(&name, "Pet name")?;
            pet.name = name.trim().to_string();
        }
        if let Some(pet_type) = request.pet_type {
            validate_name(&pet_type, "Pet type")?;
            pet.pet_type = pet_type.trim().to_string();
        }
        if let Some(image_url) = request.image_url {
            pet.image_url = crate::domain::normalize_optional(Some(image_url));
        }
        if let Some(mealtimes) = request.mealtimes {
            validate_mealtimes(&mealtimes)?;
            pet.mealtimes = mealtimes;
        }

        self.pets.update_pet(&pet).await?;

        Ok(PetResponse {
            pet,
            success_message: "Pet updated successfully".to_string(),
        })
    }

    /// Delete a pet and cascade to its feeding records.
    ///
    /// The store has no multi-document transaction: if the record batch
    /// fails after the pet document is gone, orphaned records remain until
    /// a later cascade. The window is accepted at this system's scale.
    pub async fn delete_pet(&self, pet_id: &str) -> DomainResult<()> {
        if !self.pets.delete_pet(pet_id).await? {
            return Err(DomainError::NotFound("Pet"));
        }

        let deleted = self.feedings.delete_records_for_pet(pet_id).await?;
        info!("Deleted pet {} and {} feeding records", pet_id, deleted);

        Ok(())
    }
}

fn validate_name(value: &str, field: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid(format!("{} cannot be empty", field)));
    }
    if value.len() > MAX_NAME_LENGTH {
        return Err(DomainError::invalid(format!(
            "{} cannot exceed {} characters",
            field, MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

fn validate_mealtimes(mealtimes: &[Mealtime]) -> DomainResult<()> {
    let mut seen = HashSet::new();

    for mealtime in mealtimes {
        if mealtime.id.trim().is_empty() {
            return Err(DomainError::invalid("Mealtime id cannot be empty"));
        }
        if mealtime.name.trim().is_empty() {
            return Err(DomainError::invalid("Mealtime name cannot be empty"));
        }
        // Exactly HH:mm; chrono alone would accept unpadded fields
        if mealtime.time.len() != 5 || NaiveTime::parse_from_str(&mealtime.time, "%H:%M").is_err() {
            warn!("Rejecting mealtime time {:?}", mealtime.time);
            return Err(DomainError::invalid(format!(
                "Mealtime time must be in HH:mm format: {}",
                mealtime.time
            )));
        }
        if !seen.insert(mealtime.id.as_str()) {
            return Err(DomainError::invalid(format!(
                "Duplicate mealtime id: {}",
                mealtime.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::{
        FamilyRepository, FeedingRepository, JsonConnection, PetRepository, UserRepository,
    };
    use crate::storage::traits::FamilyStorage;
    use shared::{Family, FeedingRecord, User};
    use tempfile::TempDir;

    struct Fixture {
        service: PetService,
        feedings: Arc<FeedingRepository>,
        _temp: TempDir,
    }

    async fn setup() -> Fixture {
        let temp = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp.path()).unwrap();

        let pets = Arc::new(PetRepository::new(connection.clone()));
        let feedings = Arc::new(FeedingRepository::new(connection.clone()));
        let families = Arc::new(FamilyRepository::new(connection.clone()));
        let users = Arc::new(UserRepository::new(connection));

        users
            .store_user(&User {
                id: "u1".to_string(),
                email: "alice@example.com".to_string(),
                name: "Alice".to_string(),
                avatar_url: None,
                family_ids: vec!["family::1".to_string()],
                active_family_id: Some("family::1".to_string()),
                created_at: "2024-01-01T00:00:00+00:00".to_string(),
            })
            .await
            .unwrap();
        families
            .store_family(&Family {
                id: "family::1".to_string(),
                name: "The Smiths".to_string(),
                created_by: "u1".to_string(),
                created_at: "2024-01-01T00:00:00+00:00".to_string(),
                member_ids: vec!["u1".to_string()],
            })
            .await
            .unwrap();

        let service = PetService::new(pets, feedings.clone(), users);
        Fixture { service, feedings, _temp: temp }
    }

    fn create_request() -> CreatePetRequest {
        CreatePetRequest {
            name: "Fluffy".to_string(),
            pet_type: "cat".to_string(),
            image_url: None,
            mealtimes: vec![
                Mealtime {
                    id: "breakfast".to_string(),
                    name: "Breakfast".to_string(),
                    time: "08:00".to_string(),
                },
                Mealtime {
                    id: "dinner".to_string(),
                    name: "Dinner".to_string(),
                    time: "18:00".to_string(),
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_create_pet() {
        let fx = setup().await;

        let response = fx.service.create_pet("u1", create_request()).await.unwrap();

        assert_eq!(response.pet.name, "Fluffy");
        assert_eq!(response.pet.family_id, "family::1");
        assert_eq!(response.pet.mealtimes.len(), 2);
        assert!(response.pet.id.starts_with("pet::"));

        let listed = fx.service.list_pets("u1").await.unwrap();
        assert_eq!(listed.pets.len(), 1);
    }

    #[tokio::test]
    async fn test_create_pet_requires_family() {
        let fx = setup().await;

        let err = fx.service.create_pet("stranger", create_request()).await.unwrap_err();
        assert!(matches!(err, DomainError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_create_pet_validation() {
        let fx = setup().await;

        let mut request = create_request();
        request.name = "  ".to_string();
        assert!(fx.service.create_pet("u1", request).await.is_err());

        let mut request = create_request();
        request.mealtimes[0].time = "8:00".to_string();
        assert!(fx.service.create_pet("u1", request).await.is_err());

        let mut request = create_request();
        request.mealtimes[0].time = "25:00".to_string();
        assert!(fx.service.create_pet("u1", request).await.is_err());

        let mut request = create_request();
        request.mealtimes[1].id = "breakfast".to_string();
        let err = fx.service.create_pet("u1", request).await.unwrap_err();
        assert!(matches!(err, DomainError::Invalid(msg) if msg.contains("Duplicate mealtime")));
    }

    #[tokio::test]
    async fn test_empty_image_url_stored_as_absent() {
        let fx = setup().await;

        let mut request = create_request();
        request.image_url = Some("".to_string());
        let response = fx.service.create_pet("u1", request).await.unwrap();
        assert!(response.pet.image_url.is_none());
    }

    #[tokio::test]
    async fn test_update_pet_partial() {
        let fx = setup().await;
        let created = fx.service.create_pet("u1", create_request()).await.unwrap();

        let response = fx
            .service
            .update_pet(
                &created.pet.id,
                UpdatePetRequest {
                    name: Some("Sir Fluffington".to_string()),
                    pet_type: None,
                    image_url: None,
                    mealtimes: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(response.pet.name, "Sir Fluffington");
        assert_eq!(response.pet.pet_type, "cat");
        assert_eq!(response.pet.mealtimes.len(), 2);
        assert_eq!(response.pet.created_at, created.pet.created_at);
    }

    #[tokio::test]
    async fn test_update_nonexistent_pet() {
        let fx = setup().await;

        let result = fx
            .service
            .update_pet(
                "pet::999",
                UpdatePetRequest {
                    name: Some("Ghost".to_string()),
                    pet_type: None,
                    image_url: None,
                    mealtimes: None,
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_pet_cascades_to_feeding_records() {
        let fx = setup().await;
        let created = fx.service.create_pet("u1", create_request()).await.unwrap();
        let pet_id = created.pet.id.clone();

        for date in ["2024-01-01", "2024-01-02"] {
            fx.feedings
                .create_record(&FeedingRecord {
                    id: FeedingRecord::record_key(&pet_id, "breakfast", date),
                    pet_id: pet_id.clone(),
                    mealtime_id: "breakfast".to_string(),
                    date: date.to_string(),
                    fed_by: "u1".to_string(),
                    fed_at: format!("{}T08:00:00+00:00", date),
                    notes: None,
                })
                .await
                .unwrap();
        }

        fx.service.delete_pet(&pet_id).await.unwrap();

        assert!(matches!(
            fx.service.get_pet(&pet_id).await,
            Err(DomainError::NotFound(_))
        ));
        assert!(fx
            .feedings
            .list_records_for_pet(&pet_id, 30)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_pet() {
        let fx = setup().await;

        let result = fx.service.delete_pet("pet::999").await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }
}
