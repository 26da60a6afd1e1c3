use std::sync::Arc;

use chrono::Utc;
use log::info;
use shared::{
    CreateFamilyRequest, Family, FamilyListResponse, FamilyResponse, JoinFamilyRequest,
    MemberListResponse,
};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::membership;
use crate::storage::traits::{FamilyStorage, UserStorage};

const MAX_NAME_LENGTH: usize = 100;

/// Service for family creation, membership and member listing
#[derive(Clone)]
pub struct FamilyService {
    families: Arc<dyn FamilyStorage>,
    users: Arc<dyn UserStorage>,
}

impl FamilyService {
    pub fn new(families: Arc<dyn FamilyStorage>, users: Arc<dyn UserStorage>) -> Self {
        Self { families, users }
    }

    /// Create a new family. The creator becomes its first member and the
    /// family becomes their active family.
    pub async fn create_family(
        &self,
        acting_user_id: &str,
        request: CreateFamilyRequest,
    ) -> DomainResult<FamilyResponse> {
        info!("Creating family: name={}", request.name);

        if request.name.trim().is_empty() {
            return Err(DomainError::invalid("Family name cannot be empty"));
        }
        if request.name.len() > MAX_NAME_LENGTH {
            return Err(DomainError::invalid(format!(
                "Family name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }

        let mut user = self
            .users
            .get_user(acting_user_id)
            .await?
            .ok_or(DomainError::NotFound("User"))?;

        let now = Utc::now();
        let family = Family {
            id: Family::generate_id(now.timestamp_millis() as u64),
            name: request.name.trim().to_string(),
            created_by: acting_user_id.to_string(),
            created_at: now.to_rfc3339(),
            member_ids: vec![acting_user_id.to_string()],
        };

        self.families.store_family(&family).await?;

        user.family_ids.push(family.id.clone());
        user.active_family_id = Some(family.id.clone());
        self.users.update_user(&user).await?;

        info!("Created family {} with ID {}", family.name, family.id);

        Ok(FamilyResponse {
            family,
            success_message: "Family created successfully".to_string(),
        })
    }

    /// List every family the acting user belongs to.
    /// Memberships pointing at missing family documents are skipped.
    pub async fn list_families(&self, acting_user_id: &str) -> DomainResult<FamilyListResponse> {
        let user = self
            .users
            .get_user(acting_user_id)
            .await?
            .ok_or(DomainError::NotFound("User"))?;

        let mut families = Vec::new();
        for family_id in &user.family_ids {
            if let Some(family) = self.families.get_family(family_id).await? {
                families.push(family);
            }
        }

        Ok(FamilyListResponse { families })
    }

    /// The acting user's active family, or None when they have none
    pub async fn get_active_family(&self, acting_user_id: &str) -> DomainResult<Option<Family>> {
        let family_id = match membership::resolve_active_family(self.users.as_ref(), acting_user_id).await? {
            Some(id) => id,
            None => return Ok(None),
        };

        Ok(self.families.get_family(&family_id).await?)
    }

    /// List the members of the acting user's active family
    pub async fn list_members(&self, acting_user_id: &str) -> DomainResult<MemberListResponse> {
        let family = match self.get_active_family(acting_user_id).await? {
            Some(family) => family,
            None => return Ok(MemberListResponse { members: Vec::new() }),
        };

        let mut members = Vec::new();
        for member_id in &family.member_ids {
            if let Some(user) = self.users.get_user(member_id).await? {
                members.push(user);
            }
        }

        Ok(MemberListResponse { members })
    }

    /// Join an existing family; the joined family becomes the user's active one
    pub async fn join_family(
        &self,
        acting_user_id: &str,
        request: JoinFamilyRequest,
    ) -> DomainResult<()> {
        let mut family = self
            .families
            .get_family(&request.family_id)
            .await?
            .ok_or(DomainError::NotFound("Family"))?;

        if family.member_ids.iter().any(|id| id == acting_user_id) {
            return Err(DomainError::invalid("Already a member of this family"));
        }

        let mut user = self
            .users
            .get_user(acting_user_id)
            .await?
            .ok_or(DomainError::NotFound("User"))?;

        family.member_ids.push(acting_user_id.to_string());
        self.families.update_family(&family).await?;

        user.family_ids.push(family.id.clone());
        user.active_family_id = Some(family.id.clone());
        self.users.update_user(&user).await?;

        info!("User {} joined family {}", acting_user_id, family.id);
        Ok(())
    }
}
