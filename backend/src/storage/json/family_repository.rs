use anyhow::Result;
use async_trait::async_trait;
use log::info;
use shared::Family;

use super::connection::JsonConnection;
use crate::storage::traits::FamilyStorage;

const COLLECTION: &str = "families";

/// JSON-document family repository
#[derive(Clone)]
pub struct FamilyRepository {
    connection: JsonConnection,
}

impl FamilyRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl FamilyStorage for FamilyRepository {
    async fn store_family(&self, family: &Family) -> Result<()> {
        self.connection.write_document(COLLECTION, &family.id, family)?;
        info!("Stored family {} ({})", family.name, family.id);
        Ok(())
    }

    async fn get_family(&self, family_id: &str) -> Result<Option<Family>> {
        self.connection.read_document(COLLECTION, family_id)
    }

    async fn update_family(&self, family: &Family) -> Result<()> {
        self.connection.write_document(COLLECTION, &family.id, family)?;
        info!("Updated family {} ({})", family.name, family.id);
        Ok(())
    }
}
