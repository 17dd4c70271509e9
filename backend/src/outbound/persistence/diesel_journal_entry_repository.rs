//! PostgreSQL-backed `JournalEntryRepository` implementation using Diesel ORM.
//!
//! Keywords are stored as JSON text and decoded back into tags on read.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{JournalEntryRepository, JournalEntryRepositoryError};
use crate::domain::{
    DisplayName, EntryId, Feeling, GeneratedFeedback, JournalEntry, KeywordTag, NewJournalEntry,
    UserId,
};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{JournalEntryRow, NewJournalEntryRow};
use super::pool::DbPool;
use super::schema::journal_entries;

/// Diesel-backed implementation of the journal entry repository port.
#[derive(Clone)]
pub struct DieselJournalEntryRepository {
    pool: DbPool,
}

impl DieselJournalEntryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn encode_keywords(keywords: &[KeywordTag]) -> Result<String, JournalEntryRepositoryError> {
    serde_json::to_string(keywords)
        .map_err(|err| JournalEntryRepositoryError::query(format!("serialise keywords: {err}")))
}

fn row_to_entry(row: JournalEntryRow) -> Result<JournalEntry, JournalEntryRepositoryError> {
    let id = row.id;
    let corrupt = |field: &str, err: &dyn std::fmt::Display| {
        JournalEntryRepositoryError::query(format!("entry {id}: invalid {field}: {err}"))
    };

    let user_id = UserId::new(&row.user_id).map_err(|err| corrupt("user_id", &err))?;
    let display_name =
        DisplayName::new(row.display_name.clone()).map_err(|err| corrupt("display_name", &err))?;
    let feeling = row
        .feeling
        .parse::<Feeling>()
        .map_err(|err| corrupt("feeling", &err))?;
    let keywords: Vec<KeywordTag> =
        serde_json::from_str(&row.keywords).map_err(|err| corrupt("keywords", &err))?;

    Ok(JournalEntry::from_new(
        EntryId::from_uuid(id),
        NewJournalEntry {
            user_id,
            display_name,
            body_text: row.body_text,
            feeling,
            feedback: GeneratedFeedback::new(row.summary, keywords),
            created_at: row.created_at,
        },
    ))
}

#[async_trait]
impl JournalEntryRepository for DieselJournalEntryRepository {
    async fn insert(&self, entry: &NewJournalEntry) -> Result<EntryId, JournalEntryRepositoryError> {
        let id = EntryId::generate();
        let keywords = encode_keywords(entry.feedback.keywords())?;
        let row = NewJournalEntryRow {
            id: *id.as_uuid(),
            user_id: entry.user_id.as_ref(),
            display_name: entry.display_name.as_ref(),
            body_text: entry.body_text.as_str(),
            feeling: entry.feeling.as_str(),
            summary: entry.feedback.summary(),
            keywords: keywords.as_str(),
            created_at: entry.created_at,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(journal_entries::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(id)
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<JournalEntry>, JournalEntryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<JournalEntryRow> = journal_entries::table
            .filter(journal_entries::user_id.eq(user_id.as_ref()))
            .order((journal_entries::created_at.desc(), journal_entries::id.desc()))
            .select(JournalEntryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_entry).collect()
    }

    async fn delete_by_id(&self, id: &EntryId) -> Result<bool, JournalEntryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(journal_entries::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage; queries need a live database.
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    #[fixture]
    fn row() -> JournalEntryRow {
        JournalEntryRow {
            id: Uuid::now_v7(),
            user_id: "42".to_owned(),
            display_name: "Sam".to_owned(),
            body_text: "Rough week.".to_owned(),
            feeling: "Stressed".to_owned(),
            summary: "Sam, you carried a lot.".to_owned(),
            keywords: r#"[{"keyword":"deadline","summary":"The deadline moved."}]"#.to_owned(),
            created_at: Utc
                .with_ymd_and_hms(2026, 2, 1, 8, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[rstest]
    fn decodes_row_into_entry(row: JournalEntryRow) {
        let id = row.id;
        let entry = row_to_entry(row).expect("row decodes");

        assert_eq!(entry.id(), EntryId::from_uuid(id));
        assert_eq!(entry.feeling(), Feeling::Stressed);
        assert_eq!(
            entry.feedback().keywords(),
            [KeywordTag::new("deadline", "The deadline moved.")]
        );
    }

    #[rstest]
    fn keywords_survive_encoding() {
        let tags = vec![
            KeywordTag::new("sleep", "Late nights drained you."),
            KeywordTag::new("family", "A call lifted your mood."),
        ];
        let encoded = encode_keywords(&tags).expect("encode");
        let decoded: Vec<KeywordTag> = serde_json::from_str(&encoded).expect("decode");
        assert_eq!(decoded, tags);
    }

    #[rstest]
    #[case::feeling(|r: &mut JournalEntryRow| r.feeling = "Bored".into())]
    #[case::keywords(|r: &mut JournalEntryRow| r.keywords = "not json".into())]
    #[case::user(|r: &mut JournalEntryRow| r.user_id = " ".into())]
    fn corrupt_rows_are_query_errors(row: JournalEntryRow, #[case] corrupt: fn(&mut JournalEntryRow)) {
        let mut row = row;
        corrupt(&mut row);
        assert!(matches!(
            row_to_entry(row),
            Err(JournalEntryRepositoryError::Query { .. })
        ));
    }
}
