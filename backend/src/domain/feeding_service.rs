use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use log::{info, warn};
use shared::{DailyFeedingStatus, FeedingRecord, MarkAsFedRequest, UnmarkAsFedRequest};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::{membership, status};
use crate::storage::traits::{FamilyStorage, FeedingStorage, PetStorage, UserStorage};

const DEFAULT_HISTORY_LIMIT: u32 = 30;
const MAX_HISTORY_LIMIT: u32 = 100;

/// Service for the feeding workflow: marking and unmarking meals and
/// reading the shared daily dashboard.
///
/// Mark/unmark are scoped to a single (pet, mealtime, date) triple. The
/// at-most-one-record invariant is enforced by the record's deterministic
/// ID: the store refuses a second document with the same key, so two
/// concurrent marks cannot both succeed.
#[derive(Clone)]
pub struct FeedingService {
    pets: Arc<dyn PetStorage>,
    feedings: Arc<dyn FeedingStorage>,
    families: Arc<dyn FamilyStorage>,
    users: Arc<dyn UserStorage>,
}

impl FeedingService {
    pub fn new(
        pets: Arc<dyn PetStorage>,
        feedings: Arc<dyn FeedingStorage>,
        families: Arc<dyn FamilyStorage>,
        users: Arc<dyn UserStorage>,
    ) -> Self {
        Self { pets, feedings, families, users }
    }

    /// Compute the daily feeding status for the acting user's family.
    /// Without a date, the server's current date is used. Users without a
    /// family see an empty dashboard.
    pub async fn get_daily_status(
        &self,
        acting_user_id: &str,
        date: Option<String>,
    ) -> DomainResult<Vec<DailyFeedingStatus>> {
        let date = match date {
            Some(date) => {
                validate_date(&date)?;
                date
            }
            None => Local::now().format("%Y-%m-%d").to_string(),
        };

        info!("Computing daily status for user {} on {}", acting_user_id, date);

        let family_id = match membership::resolve_active_family(self.users.as_ref(), acting_user_id).await? {
            Some(id) => id,
            None => return Ok(Vec::new()),
        };

        let pets = self.pets.list_pets_by_family(&family_id).await?;
        let records = self.feedings.list_records_for_date(&date).await?;
        let members = self.member_names(&family_id).await?;

        Ok(status::compute_daily_status(&pets, &records, &members, &date))
    }

    /// Mark one mealtime as fed on one day.
    /// Fails with AlreadyFed when a record for the triple exists; the
    /// existing record's feeder and notes are never overwritten.
    pub async fn mark_as_fed(
        &self,
        acting_user_id: &str,
        request: MarkAsFedRequest,
    ) -> DomainResult<FeedingRecord> {
        validate_triple(&request.pet_id, &request.mealtime_id, &request.date)?;

        let record = FeedingRecord {
            id: FeedingRecord::record_key(&request.pet_id, &request.mealtime_id, &request.date),
            pet_id: request.pet_id,
            mealtime_id: request.mealtime_id,
            date: request.date,
            fed_by: acting_user_id.to_string(),
            fed_at: Utc::now().to_rfc3339(),
            notes: crate::domain::normalize_optional(request.notes),
        };

        if !self.feedings.create_record(&record).await? {
            warn!("Duplicate mark for {}", record.id);
            return Err(DomainError::AlreadyFed);
        }

        info!("Marked {} as fed by {}", record.id, record.fed_by);
        Ok(record)
    }

    /// Remove the feeding record for one (pet, mealtime, date) triple.
    /// Deliberately takes no acting user: the daily status is shared family
    /// state and any member may undo any mark.
    pub async fn unmark_as_fed(&self, request: UnmarkAsFedRequest) -> DomainResult<()> {
        validate_triple(&request.pet_id, &request.mealtime_id, &request.date)?;

        let record_id = FeedingRecord::record_key(&request.pet_id, &request.mealtime_id, &request.date);

        if !self.feedings.delete_record(&record_id).await? {
            return Err(DomainError::NotFound("Feeding record"));
        }

        info!("Unmarked {}", record_id);
        Ok(())
    }

    /// A pet's feeding history, most recent first.
    pub async fn get_history(&self, pet_id: &str, limit: Option<u32>) -> DomainResult<Vec<FeedingRecord>> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        if limit < 1 || limit > MAX_HISTORY_LIMIT {
            return Err(DomainError::invalid(format!(
                "History limit must be between 1 and {}",
                MAX_HISTORY_LIMIT
            )));
        }

        Ok(self.feedings.list_records_for_pet(pet_id, limit).await?)
    }

    /// Resolve member IDs of a family to display names for the dashboard.
    async fn member_names(&self, family_id: &str) -> DomainResult<HashMap<String, String>> {
        let family = match self.families.get_family(family_id).await? {
            Some(family) => family,
            None => {
                warn!("Active family {} has no document", family_id);
                return Ok(HashMap::new());
            }
        };

        let mut names = HashMap::new();
        for member_id in &family.member_ids {
            if let Some(user) = self.users.get_user(member_id).await? {
                names.insert(user.id, user.name);
            }
        }

        Ok(names)
    }
}

fn validate_triple(pet_id: &str, mealtime_id: &str, date: &str) -> DomainResult<()> {
    if pet_id.trim().is_empty() {
        return Err(DomainError::invalid("Pet id cannot be empty"));
    }
    if mealtime_id.trim().is_empty() {
        return Err(DomainError::invalid("Mealtime id cannot be empty"));
    }
    validate_date(date)
}

fn validate_date(date: &str) -> DomainResult<()> {
    // Exactly YYYY-MM-DD; chrono alone would accept unpadded fields
    if date.len() != 10 || NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(DomainError::invalid(format!(
            "Date must be in YYYY-MM-DD format: {}",
            date
        )));
    }
    Ok(())
}
