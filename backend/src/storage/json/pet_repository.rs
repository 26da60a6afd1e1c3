use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use shared::Pet;

use super::connection::JsonConnection;
use crate::storage::traits::PetStorage;

const COLLECTION: &str = "pets";

/// JSON-document pet repository
#[derive(Clone)]
pub struct PetRepository {
    connection: JsonConnection,
}

impl PetRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl PetStorage for PetRepository {
    async fn store_pet(&self, pet: &Pet) -> Result<()> {
        self.connection.write_document(COLLECTION, &pet.id, pet)?;
        info!("Stored pet {} ({})", pet.name, pet.id);
        Ok(())
    }

    async fn get_pet(&self, pet_id: &str) -> Result<Option<Pet>> {
        self.connection.read_document(COLLECTION, pet_id)
    }

    async fn list_pets_by_family(&self, family_id: &str) -> Result<Vec<Pet>> {
        let mut pets: Vec<Pet> = self
            .connection
            .scan_collection::<Pet>(COLLECTION)?
            .into_iter()
            .filter(|p| p.family_id == family_id)
            .collect();

        // Newest first; pets with foreign ID formats sort last
        pets.sort_by_key(|p| std::cmp::Reverse(p.extract_timestamp().unwrap_or(0)));

        debug!("Found {} pets for family {}", pets.len(), family_id);
        Ok(pets)
    }

    async fn update_pet(&self, pet: &Pet) -> Result<()> {
        self.connection.write_document(COLLECTION, &pet.id, pet)?;
        info!("Updated pet {} ({})", pet.name, pet.id);
        Ok(())
    }

    async fn delete_pet(&self, pet_id: &str) -> Result<bool> {
        let deleted = self.connection.delete_document(COLLECTION, pet_id)?;
        if deleted {
            info!("Deleted pet {}", pet_id);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Mealtime;
    use tempfile::TempDir;

    fn setup() -> (PetRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        (PetRepository::new(connection), temp_dir)
    }

    fn sample_pet(id: &str, family_id: &str) -> Pet {
        Pet {
            id: id.to_string(),
            name: "Fluffy".to_string(),
            pet_type: "cat".to_string(),
            image_url: None,
            family_id: family_id.to_string(),
            mealtimes: vec![Mealtime {
                id: "breakfast".to_string(),
                name: "Breakfast".to_string(),
                time: "08:00".to_string(),
            }],
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_store_and_get_pet() {
        let (repo, _temp) = setup();
        let pet = sample_pet("pet::100", "family::1");

        repo.store_pet(&pet).await.unwrap();

        let loaded = repo.get_pet("pet::100").await.unwrap();
        assert_eq!(loaded, Some(pet));

        let missing = repo.get_pet("pet::999").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_pets_filters_by_family_and_sorts_newest_first() {
        let (repo, _temp) = setup();

        repo.store_pet(&sample_pet("pet::100", "family::1")).await.unwrap();
        repo.store_pet(&sample_pet("pet::300", "family::1")).await.unwrap();
        repo.store_pet(&sample_pet("pet::200", "family::2")).await.unwrap();

        let pets = repo.list_pets_by_family("family::1").await.unwrap();
        assert_eq!(pets.len(), 2);
        assert_eq!(pets[0].id, "pet::300");
        assert_eq!(pets[1].id, "pet::100");

        let other = repo.list_pets_by_family("family::2").await.unwrap();
        assert_eq!(other.len(), 1);

        let none = repo.list_pets_by_family("family::3").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_delete_pet() {
        let (repo, _temp) = setup();
        repo.store_pet(&sample_pet("pet::100", "family::1")).await.unwrap();

        assert!(repo.delete_pet("pet::100").await.unwrap());
        assert!(!repo.delete_pet("pet::100").await.unwrap());
        assert!(repo.get_pet("pet::100").await.unwrap().is_none());
    }
}
