//! Diesel row types for the `journal_entries` table.
//!
//! Rows are internal to the persistence adapter; the repository converts them
//! to and from domain entries.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::journal_entries;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = journal_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JournalEntryRow {
    pub id: Uuid,
    pub user_id: String,
    pub display_name: String,
    pub body_text: String,
    pub feeling: String,
    pub summary: String,
    /// JSON array of `{keyword, summary}` objects.
    pub keywords: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = journal_entries)]
pub(crate) struct NewJournalEntryRow<'a> {
    pub id: Uuid,
    pub user_id: &'a str,
    pub display_name: &'a str,
    pub body_text: &'a str,
    pub feeling: &'a str,
    pub summary: &'a str,
    pub keywords: &'a str,
    pub created_at: DateTime<Utc>,
}
