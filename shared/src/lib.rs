use serde::{Deserialize, Serialize};
use std::fmt;

/// A user account known to the feeding tracker.
///
/// Accounts are created by the upstream session layer; this crate only
/// carries the fields the tracker itself reads and writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// All families this user belongs to
    #[serde(default)]
    pub family_ids: Vec<String>,
    /// Currently selected family, when the user belongs to more than one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_family_id: Option<String>,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// A group of user accounts sharing visibility over pets and feeding records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    pub id: String,
    pub name: String,
    pub created_by: String,
    /// RFC 3339 timestamp
    pub created_at: String,
    pub member_ids: Vec<String>,
}

/// Pet ID in format: "pet::epoch_millis"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: String,
    pub name: String,
    /// Kind of animal (cat, dog, bird, ...)
    #[serde(rename = "type")]
    pub pet_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// ID of the family that owns this pet
    pub family_id: String,
    /// Feeding slots in insertion order
    pub mealtimes: Vec<Mealtime>,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// A named, time-of-day-tagged feeding slot belonging to a pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mealtime {
    /// Unique within the owning pet's mealtime list
    pub id: String,
    /// "Breakfast", "Dinner", "Snack", ...
    pub name: String,
    /// HH:mm, e.g. "08:00"
    pub time: String,
}

/// Feeding record ID in format: "feeding::<pet_id>::<mealtime_id>::<date>"
///
/// The ID is a deterministic function of the (pet, mealtime, date) triple so
/// that duplicate marks collide at the store level instead of racing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingRecord {
    pub id: String,
    pub pet_id: String,
    pub mealtime_id: String,
    /// Calendar date in YYYY-MM-DD format
    pub date: String,
    /// ID of the user who marked the meal as fed
    pub fed_by: String,
    /// RFC 3339 timestamp
    pub fed_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Fed/unfed state of a single mealtime on a single day.
///
/// The detail fields are present only when the meal was fed; `fed_by_name`
/// additionally requires the feeder to still be a family member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealtimeStatus {
    pub mealtime_id: String,
    pub mealtime_name: String,
    pub time: String,
    pub is_fed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fed_by_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Per-pet feeding state for one day. Derived on every read, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyFeedingStatus {
    pub pet_id: String,
    pub pet_name: String,
    pub pet_type: String,
    pub date: String,
    pub mealtimes: Vec<MealtimeStatus>,
}

/// Request for creating a new pet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub mealtimes: Vec<Mealtime>,
}

/// Request for updating an existing pet; absent fields are left unchanged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePetRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub pet_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mealtimes: Option<Vec<Mealtime>>,
}

/// Response after creating or updating a pet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetResponse {
    pub pet: Pet,
    pub success_message: String,
}

/// Response containing the active family's pets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetListResponse {
    pub pets: Vec<Pet>,
}

/// Request to mark one mealtime as fed on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAsFedRequest {
    pub pet_id: String,
    pub mealtime_id: String,
    /// YYYY-MM-DD
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Request to remove an existing feeding record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmarkAsFedRequest {
    pub pet_id: String,
    pub mealtime_id: String,
    /// YYYY-MM-DD
    pub date: String,
}

/// Query parameters for the daily status view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStatusRequest {
    /// YYYY-MM-DD; defaults to the server's current date when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Query parameters for per-pet feeding history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingHistoryRequest {
    /// 1..=100, defaults to 30
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Response containing a pet's feeding history, most recent first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingHistoryResponse {
    pub records: Vec<FeedingRecord>,
}

/// Generic acknowledgement for mutations with no other payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessResponse {
    pub success: bool,
}

/// Request for creating a new family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFamilyRequest {
    pub name: String,
}

/// Request to join an existing family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinFamilyRequest {
    pub family_id: String,
}

/// Response after creating a family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyResponse {
    pub family: Family,
    pub success_message: String,
}

/// Response containing all families the user belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyListResponse {
    pub families: Vec<Family>,
}

/// Response containing the members of the active family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberListResponse {
    pub members: Vec<User>,
}

/// Request for updating the current user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Request to switch the user's active family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchFamilyRequest {
    pub family_id: String,
}

impl Pet {
    /// Generate a pet ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("pet::{}", epoch_millis)
    }

    /// Parse a pet ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, PetIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "pet" {
            return Err(PetIdError::InvalidFormat);
        }

        parts[1].parse::<u64>().map_err(|_| PetIdError::InvalidTimestamp)
    }

    /// Extract creation timestamp from the pet ID, used for newest-first sorting
    pub fn extract_timestamp(&self) -> Result<u64, PetIdError> {
        Self::parse_id(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PetIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for PetIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PetIdError::InvalidFormat => write!(f, "Invalid pet ID format"),
            PetIdError::InvalidTimestamp => write!(f, "Invalid timestamp in pet ID"),
        }
    }
}

impl std::error::Error for PetIdError {}

impl Family {
    /// Generate a family ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("family::{}", epoch_millis)
    }
}

impl FeedingRecord {
    /// Build the deterministic record ID for a (pet, mealtime, date) triple.
    ///
    /// Two marks of the same triple produce the same ID, so the second write
    /// is rejected by the store rather than creating a duplicate record.
    pub fn record_key(pet_id: &str, mealtime_id: &str, date: &str) -> String {
        format!("feeding::{}::{}::{}", pet_id, mealtime_id, date)
    }

    /// Parse a record ID back into its (pet_id, mealtime_id, date) triple.
    ///
    /// Pet IDs themselves contain "::", so the key is unpacked from the right:
    /// the date and mealtime ID never contain the separator.
    pub fn parse_key(key: &str) -> Result<(String, String, String), FeedingKeyError> {
        let rest = key
            .strip_prefix("feeding::")
            .ok_or(FeedingKeyError::InvalidFormat)?;

        let (rest, date) = rest.rsplit_once("::").ok_or(FeedingKeyError::InvalidFormat)?;
        let (pet_id, mealtime_id) = rest.rsplit_once("::").ok_or(FeedingKeyError::InvalidFormat)?;

        if pet_id.is_empty() || mealtime_id.is_empty() || date.is_empty() {
            return Err(FeedingKeyError::InvalidFormat);
        }

        Ok((pet_id.to_string(), mealtime_id.to_string(), date.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedingKeyError {
    InvalidFormat,
}

impl fmt::Display for FeedingKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedingKeyError::InvalidFormat => write!(f, "Invalid feeding record key format"),
        }
    }
}

impl std::error::Error for FeedingKeyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_pet_id() {
        let pet_id = Pet::generate_id(1702516122000);
        assert_eq!(pet_id, "pet::1702516122000");
    }

    #[test]
    fn test_parse_pet_id() {
        let timestamp = Pet::parse_id("pet::1702516122000").unwrap();
        assert_eq!(timestamp, 1702516122000);

        assert!(Pet::parse_id("invalid::format").is_err());
        assert!(Pet::parse_id("pet").is_err());
        assert!(Pet::parse_id("pet::not_a_number").is_err());
        assert!(Pet::parse_id("family::123").is_err());
    }

    #[test]
    fn test_pet_extract_timestamp() {
        let pet = Pet {
            id: "pet::1702516122000".to_string(),
            name: "Fluffy".to_string(),
            pet_type: "cat".to_string(),
            image_url: None,
            family_id: "family::1".to_string(),
            mealtimes: vec![],
            created_at: "2023-12-14T01:02:02.000Z".to_string(),
        };

        assert_eq!(pet.extract_timestamp().unwrap(), 1702516122000);
    }

    #[test]
    fn test_generate_family_id() {
        assert_eq!(Family::generate_id(1702516122000), "family::1702516122000");
    }

    #[test]
    fn test_feeding_record_key() {
        let key = FeedingRecord::record_key("pet::1702516122000", "breakfast", "2024-01-01");
        assert_eq!(key, "feeding::pet::1702516122000::breakfast::2024-01-01");

        // Same triple always yields the same key
        let again = FeedingRecord::record_key("pet::1702516122000", "breakfast", "2024-01-01");
        assert_eq!(key, again);
    }

    #[test]
    fn test_parse_feeding_record_key() {
        let (pet_id, mealtime_id, date) =
            FeedingRecord::parse_key("feeding::pet::1702516122000::breakfast::2024-01-01").unwrap();
        assert_eq!(pet_id, "pet::1702516122000");
        assert_eq!(mealtime_id, "breakfast");
        assert_eq!(date, "2024-01-01");

        // Mealtime IDs are opaque strings from the client
        let (pet_id, mealtime_id, date) =
            FeedingRecord::parse_key("feeding::fluffy-1::dinner::2024-06-30").unwrap();
        assert_eq!(pet_id, "fluffy-1");
        assert_eq!(mealtime_id, "dinner");
        assert_eq!(date, "2024-06-30");

        assert!(FeedingRecord::parse_key("pet::123").is_err());
        assert!(FeedingRecord::parse_key("feeding::only-one-part").is_err());
        assert!(FeedingRecord::parse_key("feeding::a::b").is_err());
        assert!(FeedingRecord::parse_key("feeding::::b::c").is_err());
    }

    #[test]
    fn test_optional_fields_absent_in_json() {
        let record = FeedingRecord {
            id: FeedingRecord::record_key("pet::1", "breakfast", "2024-01-01"),
            pet_id: "pet::1".to_string(),
            mealtime_id: "breakfast".to_string(),
            date: "2024-01-01".to_string(),
            fed_by: "u1".to_string(),
            fed_at: "2024-01-01T08:05:00+00:00".to_string(),
            notes: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        // Absent, not null
        assert!(json.get("notes").is_none());
        assert_eq!(json["petId"], "pet::1");
        assert_eq!(json["fedBy"], "u1");
    }

    #[test]
    fn test_mealtime_status_serializes_camel_case() {
        let status = MealtimeStatus {
            mealtime_id: "breakfast".to_string(),
            mealtime_name: "Breakfast".to_string(),
            time: "08:00".to_string(),
            is_fed: false,
            fed_by: None,
            fed_by_name: None,
            fed_at: None,
            notes: None,
        };

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["mealtimeId"], "breakfast");
        assert_eq!(json["isFed"], false);
        assert!(json.get("fedBy").is_none());
        assert!(json.get("fedByName").is_none());
    }
}
