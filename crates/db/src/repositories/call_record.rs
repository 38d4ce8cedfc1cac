use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::Row;

use switchboard_core::domain::call_record::{CallId, CallRecord, CallStatus};

use super::{CallRecordRepository, RepositoryError};
use crate::DbPool;

pub struct SqlCallRecordRepository {
    pool: DbPool,
}

impl SqlCallRecordRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

// Timestamps are stored as fixed-width RFC 3339 so lexicographic ordering in
// SQL matches chronological ordering.
fn encode_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|value| value.with_timezone(&Utc))
        .map_err(|error| RepositoryError::Decode(format!("invalid timestamp `{raw}`: {error}")))
}

fn decode_row(row: &sqlx::sqlite::SqliteRow) -> Result<CallRecord, RepositoryError> {
    let status_raw = row.get::<String, _>("status");
    let status = status_raw
        .parse::<CallStatus>()
        .map_err(RepositoryError::Decode)?;

    Ok(CallRecord {
        call_id: CallId(row.get::<String, _>("call_id")),
        timestamp: decode_timestamp(&row.get::<String, _>("timestamp"))?,
        caller_name: row.get::<String, _>("caller_name"),
        caller_phone: row.get::<String, _>("caller_phone"),
        reason: row.get::<String, _>("reason"),
        is_spam: row.get::<i64, _>("is_spam") != 0,
        status,
        notification_sent: row.get::<i64, _>("notification_sent") != 0,
    })
}

#[async_trait::async_trait]
impl CallRecordRepository for SqlCallRecordRepository {
    async fn insert(&self, record: CallRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO call_record (
                call_id, timestamp, caller_name, caller_phone, reason,
                is_spam, status, notification_sent
             )
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.call_id.0)
        .bind(encode_timestamp(record.timestamp))
        .bind(&record.caller_name)
        .bind(&record.caller_phone)
        .bind(&record.reason)
        .bind(record.is_spam as i64)
        .bind(record.status.as_str())
        .bind(record.notification_sent as i64)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_call_id(&self, id: &CallId) -> Result<Option<CallRecord>, RepositoryError> {
        let row = sqlx::query(
            "SELECT call_id, timestamp, caller_name, caller_phone, reason,
                    is_spam, status, notification_sent
             FROM call_record
             WHERE call_id = ?
             ORDER BY timestamp DESC
             LIMIT 1",
        )
        .bind(&id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(decode_row).transpose()
    }

    async fn history_for_phone(
        &self,
        caller_phone: &str,
        limit: u32,
    ) -> Result<Vec<CallRecord>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT call_id, timestamp, caller_name, caller_phone, reason,
                    is_spam, status, notification_sent
             FROM call_record
             WHERE caller_phone = ?
             ORDER BY timestamp DESC
             LIMIT ?",
        )
        .bind(caller_phone)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(decode_row).collect()
    }

    async fn mark_notification_sent(&self, id: &CallId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE call_record SET notification_sent = 1 WHERE call_id = ?",
        )
        .bind(&id.0)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use switchboard_core::domain::call_record::{CallId, CallRecord, CallStatus};

    use super::SqlCallRecordRepository;
    use crate::repositories::CallRecordRepository;
    use crate::{connect_with_settings, migrations, DbPool};

    async fn repository() -> (SqlCallRecordRepository, DbPool) {
        let pool = connect_with_settings("sqlite::memory:", 1, 5).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrate");
        (SqlCallRecordRepository::new(pool.clone()), pool)
    }

    #[tokio::test]
    async fn inserted_record_is_retrievable_by_call_id() {
        let (repository, pool) = repository().await;

        let record = CallRecord::new(None, "Ada Lovelace", "+61400000000", "quote follow-up", false);
        let call_id = record.call_id.clone();
        repository.insert(record.clone()).await.expect("insert");

        let found = repository
            .find_by_call_id(&call_id)
            .await
            .expect("lookup")
            .expect("record should exist");

        assert_eq!(found.call_id, call_id);
        assert_eq!(found.caller_name, "Ada Lovelace");
        assert_eq!(found.status, CallStatus::Completed);
        assert!(!found.notification_sent);

        pool.close().await;
    }

    #[tokio::test]
    async fn identical_inputs_produce_distinct_records() {
        let (repository, pool) = repository().await;

        let first = CallRecord::new(None, "Ada", "+61400000000", "same reason", false);
        let second = CallRecord::new(None, "Ada", "+61400000000", "same reason", false);
        assert_ne!(first.call_id, second.call_id);

        repository.insert(first.clone()).await.expect("insert first");
        repository.insert(second.clone()).await.expect("insert second");

        let history =
            repository.history_for_phone("+61400000000", 10).await.expect("history");
        assert_eq!(history.len(), 2, "re-invocation must create a new record, not dedup");

        pool.close().await;
    }

    #[tokio::test]
    async fn empty_optional_fields_persist_as_empty_values() {
        let (repository, pool) = repository().await;

        let record = CallRecord::new(None, "", "+61400000000", "", false);
        let call_id = record.call_id.clone();
        repository.insert(record).await.expect("insert");

        let found = repository
            .find_by_call_id(&call_id)
            .await
            .expect("lookup")
            .expect("record should exist");

        assert_eq!(found.caller_name, "");
        assert_eq!(found.reason, "", "empty reason must persist verbatim, not a placeholder");

        pool.close().await;
    }

    #[tokio::test]
    async fn phone_history_returns_most_recent_first() {
        let (repository, pool) = repository().await;

        let mut older = CallRecord::new(None, "Ada", "+61400000000", "first call", false);
        older.timestamp = Utc::now() - Duration::minutes(10);
        let newer = CallRecord::new(None, "Ada", "+61400000000", "second call", false);
        let unrelated = CallRecord::new(None, "Eve", "+15550000000", "other caller", false);

        repository.insert(older.clone()).await.expect("insert older");
        repository.insert(newer.clone()).await.expect("insert newer");
        repository.insert(unrelated).await.expect("insert unrelated");

        let history =
            repository.history_for_phone("+61400000000", 10).await.expect("history");

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].call_id, newer.call_id, "most recent record should come first");
        assert_eq!(history[1].call_id, older.call_id);

        pool.close().await;
    }

    #[tokio::test]
    async fn mark_notification_sent_flips_flag_for_existing_record_only() {
        let (repository, pool) = repository().await;

        let record = CallRecord::new(None, "Ada", "+61400000000", "callback please", false);
        let call_id = record.call_id.clone();
        repository.insert(record).await.expect("insert");

        let marked = repository.mark_notification_sent(&call_id).await.expect("mark");
        assert!(marked);

        let found = repository
            .find_by_call_id(&call_id)
            .await
            .expect("lookup")
            .expect("record should exist");
        assert!(found.notification_sent);

        let missing = repository
            .mark_notification_sent(&CallId("CALL-missing".to_string()))
            .await
            .expect("mark missing");
        assert!(!missing, "marking an unknown record should report no match");

        pool.close().await;
    }

    #[tokio::test]
    async fn spam_records_round_trip_status_and_verdict() {
        let (repository, pool) = repository().await;

        let record = CallRecord::new(None, "", "+1900555000", "", true);
        let call_id = record.call_id.clone();
        repository.insert(record).await.expect("insert");

        let found = repository
            .find_by_call_id(&call_id)
            .await
            .expect("lookup")
            .expect("record should exist");

        assert!(found.is_spam);
        assert_eq!(found.status, CallStatus::SpamBlocked);

        pool.close().await;
    }
}
