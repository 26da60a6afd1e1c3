use std::sync::Arc;

use log::info;
use shared::{SwitchFamilyRequest, UpdateUserRequest, User};

use crate::domain::errors::{DomainError, DomainResult};
use crate::storage::traits::UserStorage;

const MAX_NAME_LENGTH: usize = 100;

/// Service for the current user's profile and active-family selection
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStorage>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStorage>) -> Self {
        Self { users }
    }

    /// Look up the acting user's own account
    pub async fn get_current(&self, acting_user_id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get_user(acting_user_id).await?)
    }

    /// Update the acting user's profile; absent fields are left unchanged
    pub async fn update_profile(
        &self,
        acting_user_id: &str,
        request: UpdateUserRequest,
    ) -> DomainResult<User> {
        let mut user = self
            .users
            .get_user(acting_user_id)
            .await?
            .ok_or(DomainError::NotFound("User"))?;

        if let Some(name) = request.name {
            if name.trim().is_empty() {
                return Err(DomainError::invalid("Name cannot be empty"));
            }
            if name.len() > MAX_NAME_LENGTH {
                return Err(DomainError::invalid(format!(
                    "Name cannot exceed {} characters",
                    MAX_NAME_LENGTH
                )));
            }
            user.name = name.trim().to_string();
        }
        if let Some(avatar_url) = request.avatar_url {
            user.avatar_url = crate::domain::normalize_optional(Some(avatar_url));
        }

        self.users.update_user(&user).await?;
        info!("Updated profile for {}", user.id);

        Ok(user)
    }

    /// Switch the acting user's active family.
    /// Fails with NotAMember unless the user already belongs to it.
    pub async fn switch_family(
        &self,
        acting_user_id: &str,
        request: SwitchFamilyRequest,
    ) -> DomainResult<()> {
        let mut user = self
            .users
            .get_user(acting_user_id)
            .await?
            .ok_or(DomainError::NotFound("User"))?;

        if !user.family_ids.iter().any(|id| *id == request.family_id) {
            return Err(DomainError::NotAMember);
        }

        user.active_family_id = Some(request.family_id.clone());
        self.users.update_user(&user).await?;

        info!("User {} switched to family {}", acting_user_id, request.family_id);
        Ok(())
    }
}
