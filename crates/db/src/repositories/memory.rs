use std::sync::Mutex;

use switchboard_core::domain::call_record::{CallId, CallRecord};

use super::{CallRecordRepository, RepositoryError};

/// In-memory repository for tests and wiring scaffolds. Mirrors the SQL
/// implementation's ordering semantics.
#[derive(Default)]
pub struct InMemoryCallRecordRepository {
    records: Mutex<Vec<CallRecord>>,
}

impl InMemoryCallRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<CallRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait::async_trait]
impl CallRecordRepository for InMemoryCallRecordRepository {
    async fn insert(&self, record: CallRecord) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().map_err(|_| {
            RepositoryError::Decode("in-memory record store is poisoned".to_string())
        })?;
        records.push(record);
        Ok(())
    }

    async fn find_by_call_id(&self, id: &CallId) -> Result<Option<CallRecord>, RepositoryError> {
        let records = self.records.lock().map_err(|_| {
            RepositoryError::Decode("in-memory record store is poisoned".to_string())
        })?;
        Ok(records.iter().find(|record| &record.call_id == id).cloned())
    }

    async fn history_for_phone(
        &self,
        caller_phone: &str,
        limit: u32,
    ) -> Result<Vec<CallRecord>, RepositoryError> {
        let records = self.records.lock().map_err(|_| {
            RepositoryError::Decode("in-memory record store is poisoned".to_string())
        })?;

        let mut matching: Vec<CallRecord> = records
            .iter()
            .filter(|record| record.caller_phone == caller_phone)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        matching.truncate(limit as usize);
        Ok(matching)
    }

    async fn mark_notification_sent(&self, id: &CallId) -> Result<bool, RepositoryError> {
        let mut records = self.records.lock().map_err(|_| {
            RepositoryError::Decode("in-memory record store is poisoned".to_string())
        })?;

        let mut matched = false;
        for record in records.iter_mut().filter(|record| &record.call_id == id) {
            record.notification_sent = true;
            matched = true;
        }
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use switchboard_core::domain::call_record::CallRecord;

    use super::InMemoryCallRecordRepository;
    use crate::repositories::CallRecordRepository;

    #[tokio::test]
    async fn in_memory_history_matches_sql_ordering_semantics() {
        let repository = InMemoryCallRecordRepository::new();

        let mut older = CallRecord::new(None, "Ada", "+61400000000", "first", false);
        older.timestamp = Utc::now() - Duration::minutes(5);
        let newer = CallRecord::new(None, "Ada", "+61400000000", "second", false);

        repository.insert(older.clone()).await.expect("insert older");
        repository.insert(newer.clone()).await.expect("insert newer");

        let history =
            repository.history_for_phone("+61400000000", 1).await.expect("history");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].call_id, newer.call_id);
    }

    #[tokio::test]
    async fn mark_notification_sent_reports_misses() {
        let repository = InMemoryCallRecordRepository::new();
        let record = CallRecord::new(None, "Ada", "+61400000000", "", false);
        let call_id = record.call_id.clone();
        repository.insert(record).await.expect("insert");

        assert!(repository.mark_notification_sent(&call_id).await.expect("mark"));
        assert!(repository.records()[0].notification_sent);
    }
}
