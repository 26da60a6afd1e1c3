//! Daily feeding status aggregation.
//!
//! Pure function of its inputs: the current pet list, the day's feeding
//! records, and the member-name map. Computed fresh on every read, never
//! cached or persisted.

use std::collections::HashMap;

use shared::{DailyFeedingStatus, FeedingRecord, MealtimeStatus, Pet};

/// Compute each pet's per-mealtime fed/unfed view for one day.
///
/// `records` must already be filtered to the requested date by the caller.
/// Pets appear in the caller's order; mealtimes keep the pet's stored
/// order. A fed mealtime carries the feeder, their display name (absent
/// when the feeder is no longer in `members`), the feeding time, and any
/// notes; an unfed mealtime carries none of these.
pub fn compute_daily_status(
    pets: &[Pet],
    records: &[FeedingRecord],
    members: &HashMap<String, String>,
    date: &str,
) -> Vec<DailyFeedingStatus> {
    pets.iter()
        .map(|pet| {
            let mealtimes = pet
                .mealtimes
                .iter()
                .map(|mealtime| {
                    // At most one record per (pet, mealtime, date) by invariant
                    let feeding = records
                        .iter()
                        .find(|r| r.pet_id == pet.id && r.mealtime_id == mealtime.id);

                    match feeding {
                        Some(record) => MealtimeStatus {
                            mealtime_id: mealtime.id.clone(),
                            mealtime_name: mealtime.name.clone(),
                            time: mealtime.time.clone(),
                            is_fed: true,
                            fed_by: Some(record.fed_by.clone()),
                            fed_by_name: members.get(&record.fed_by).cloned(),
                            fed_at: Some(record.fed_at.clone()),
                            notes: record.notes.clone(),
                        },
                        None => MealtimeStatus {
                            mealtime_id: mealtime.id.clone(),
                            mealtime_name: mealtime.name.clone(),
                            time: mealtime.time.clone(),
                            is_fed: false,
                            fed_by: None,
                            fed_by_name: None,
                            fed_at: None,
                            notes: None,
                        },
                    }
                })
                .collect();

            DailyFeedingStatus {
                pet_id: pet.id.clone(),
                pet_name: pet.name.clone(),
                pet_type: pet.pet_type.clone(),
                date: date.to_string(),
                mealtimes,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Mealtime;

    fn fluffy() -> Pet {
        Pet {
            id: "fluffy-1".to_string(),
            name: "Fluffy".to_string(),
            pet_type: "cat".to_string(),
            image_url: None,
            family_id: "family::1".to_string(),
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
            created_at: "2023-12-01T00:00:00+00:00".to_string(),
        }
    }

    fn record(pet_id: &str, mealtime_id: &str, date: &str, fed_by: &str, notes: Option<&str>) -> FeedingRecord {
        FeedingRecord {
            id: FeedingRecord::record_key(pet_id, mealtime_id, date),
            pet_id: pet_id.to_string(),
            mealtime_id: mealtime_id.to_string(),
            date: date.to_string(),
            fed_by: fed_by.to_string(),
            fed_at: format!("{}T08:05:00+00:00", date),
            notes: notes.map(String::from),
        }
    }

    #[test]
    fn test_no_records_means_all_unfed() {
        let pets = vec![fluffy()];
        let status = compute_daily_status(&pets, &[], &HashMap::new(), "2024-01-01");

        assert_eq!(status.len(), 1);
        let entry = &status[0];
        assert_eq!(entry.pet_name, "Fluffy");
        assert_eq!(entry.date, "2024-01-01");
        assert_eq!(entry.mealtimes.len(), 2);
        for mealtime in &entry.mealtimes {
            assert!(!mealtime.is_fed);
            assert!(mealtime.fed_by.is_none());
            assert!(mealtime.fed_by_name.is_none());
            assert!(mealtime.fed_at.is_none());
            assert!(mealtime.notes.is_none());
        }
    }

    #[test]
    fn test_matched_record_marks_only_its_mealtime() {
        let pets = vec![fluffy()];
        let records = vec![record("fluffy-1", "breakfast", "2024-01-01", "u1", None)];
        let mut members = HashMap::new();
        members.insert("u1".to_string(), "Alice".to_string());

        let status = compute_daily_status(&pets, &records, &members, "2024-01-01");

        let breakfast = &status[0].mealtimes[0];
        assert!(breakfast.is_fed);
        assert_eq!(breakfast.fed_by.as_deref(), Some("u1"));
        assert_eq!(breakfast.fed_by_name.as_deref(), Some("Alice"));
        assert!(breakfast.fed_at.is_some());

        let dinner = &status[0].mealtimes[1];
        assert!(!dinner.is_fed);
        assert!(dinner.fed_by.is_none());
    }

    #[test]
    fn test_departed_member_has_no_display_name() {
        let pets = vec![fluffy()];
        let records = vec![record("fluffy-1", "breakfast", "2024-01-01", "gone-user", None)];

        let status = compute_daily_status(&pets, &records, &HashMap::new(), "2024-01-01");

        let breakfast = &status[0].mealtimes[0];
        assert!(breakfast.is_fed);
        assert_eq!(breakfast.fed_by.as_deref(), Some("gone-user"));
        assert!(breakfast.fed_by_name.is_none());
    }

    #[test]
    fn test_notes_carried_through() {
        let pets = vec![fluffy()];
        let records = vec![record("fluffy-1", "dinner", "2024-01-01", "u1", Some("ate all"))];

        let status = compute_daily_status(&pets, &records, &HashMap::new(), "2024-01-01");
        assert_eq!(status[0].mealtimes[1].notes.as_deref(), Some("ate all"));
        assert!(status[0].mealtimes[0].notes.is_none());
    }

    #[test]
    fn test_pet_with_zero_mealtimes_still_listed() {
        let mut pet = fluffy();
        pet.mealtimes.clear();

        let status = compute_daily_status(&[pet], &[], &HashMap::new(), "2024-01-01");
        assert_eq!(status.len(), 1);
        assert!(status[0].mealtimes.is_empty());
    }

    #[test]
    fn test_entry_count_and_order_match_inputs() {
        let mut rex = fluffy();
        rex.id = "rex-1".to_string();
        rex.name = "Rex".to_string();
        rex.mealtimes.push(Mealtime {
            id: "snack".to_string(),
            name: "Snack".to_string(),
            time: "12:00".to_string(),
        });

        let pets = vec![rex, fluffy()];
        let status = compute_daily_status(&pets, &[], &HashMap::new(), "2024-01-01");

        // Caller order preserved; one status entry per mealtime
        assert_eq!(status[0].pet_name, "Rex");
        assert_eq!(status[0].mealtimes.len(), 3);
        assert_eq!(status[1].pet_name, "Fluffy");
        assert_eq!(status[1].mealtimes.len(), 2);

        // Mealtimes keep stored order
        let ids: Vec<&str> = status[0].mealtimes.iter().map(|m| m.mealtime_id.as_str()).collect();
        assert_eq!(ids, vec!["breakfast", "dinner", "snack"]);
    }

    #[test]
    fn test_records_for_other_pets_ignored() {
        let pets = vec![fluffy()];
        let records = vec![record("rex-1", "breakfast", "2024-01-01", "u1", None)];

        let status = compute_daily_status(&pets, &records, &HashMap::new(), "2024-01-01");
        assert!(!status[0].mealtimes[0].is_fed);
    }
}
