use anyhow::Result;
use async_trait::async_trait;
use log::info;
use shared::User;

use super::connection::JsonConnection;
use crate::storage::traits::UserStorage;

const COLLECTION: &str = "users";

/// JSON-document user repository
#[derive(Clone)]
pub struct UserRepository {
    connection: JsonConnection,
}

impl UserRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl UserStorage for UserRepository {
    async fn store_user(&self, user: &User) -> Result<()> {
        self.connection.write_document(COLLECTION, &user.id, user)?;
        info!("Stored user {} ({})", user.name, user.id);
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        self.connection.read_document(COLLECTION, user_id)
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        self.connection.write_document(COLLECTION, &user.id, user)?;
        info!("Updated user {} ({})", user.name, user.id);
        Ok(())
    }
}
