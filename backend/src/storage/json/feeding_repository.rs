use anyhow::Result;
use async_trait::async_trait;
use chrono::DateTime;
use log::{debug, info};
use shared::FeedingRecord;

use super::connection::JsonConnection;
use crate::storage::traits::FeedingStorage;

const COLLECTION: &str = "feeding_records";

/// JSON-document feeding record repository.
///
/// Record IDs are deterministic over the (pet, mealtime, date) triple, so
/// the connection's exclusive create enforces the at-most-one-record
/// invariant without a separate lookup.
#[derive(Clone)]
pub struct FeedingRepository {
    connection: JsonConnection,
}

impl FeedingRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    fn fed_at_millis(record: &FeedingRecord) -> i64 {
        DateTime::parse_from_rfc3339(&record.fed_at)
            .map(|dt| dt.timestamp_millis())
            .unwrap_or(0)
    }
}

#[async_trait]
impl FeedingStorage for FeedingRepository {
    async fn create_record(&self, record: &FeedingRecord) -> Result<bool> {
        let created = self.connection.create_document(COLLECTION, &record.id, record)?;
        if created {
            info!(
                "Created feeding record {} (fed by {})",
                record.id, record.fed_by
            );
        }
        Ok(created)
    }

    async fn get_record(&self, record_id: &str) -> Result<Option<FeedingRecord>> {
        self.connection.read_document(COLLECTION, record_id)
    }

    async fn delete_record(&self, record_id: &str) -> Result<bool> {
        let deleted = self.connection.delete_document(COLLECTION, record_id)?;
        if deleted {
            info!("Deleted feeding record {}", record_id);
        }
        Ok(deleted)
    }

    async fn list_records_for_date(&self, date: &str) -> Result<Vec<FeedingRecord>> {
        let records: Vec<FeedingRecord> = self
            .connection
            .scan_collection::<FeedingRecord>(COLLECTION)?
            .into_iter()
            .filter(|r| r.date == date)
            .collect();

        debug!("Found {} feeding records for {}", records.len(), date);
        Ok(records)
    }

    async fn list_records_for_pet(&self, pet_id: &str, limit: u32) -> Result<Vec<FeedingRecord>> {
        let mut records: Vec<FeedingRecord> = self
            .connection
            .scan_collection::<FeedingRecord>(COLLECTION)?
            .into_iter()
            .filter(|r| r.pet_id == pet_id)
            .collect();

        records.sort_by_key(|r| std::cmp::Reverse(Self::fed_at_millis(r)));
        records.truncate(limit as usize);

        Ok(records)
    }

    async fn delete_records_for_pet(&self, pet_id: &str) -> Result<u32> {
        let records: Vec<FeedingRecord> = self
            .connection
            .scan_collection::<FeedingRecord>(COLLECTION)?
            .into_iter()
            .filter(|r| r.pet_id == pet_id)
            .collect();

        let mut deleted = 0u32;
        for record in &records {
            if self.connection.delete_document(COLLECTION, &record.id)? {
                deleted += 1;
            }
        }

        info!("Deleted {} feeding records for pet {}", deleted, pet_id);
        Ok(deleted)
    }
}
