//! Driven port for journal entry persistence.

use async_trait::async_trait;

use crate::domain::{EntryId, JournalEntry, NewJournalEntry, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by journal entry repository adapters.
    pub enum JournalEntryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "journal entry repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "journal entry repository query failed: {message}",
    }
}

/// Port for storing, listing, and deleting journal entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JournalEntryRepository: Send + Sync {
    /// Persist an entry and return its newly assigned identifier.
    async fn insert(&self, entry: &NewJournalEntry) -> Result<EntryId, JournalEntryRepositoryError>;

    /// Entries for one author, newest first.
    ///
    /// Entries sharing a creation instant are ordered by identifier,
    /// descending.
    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<JournalEntry>, JournalEntryRepositoryError>;

    /// Remove an entry. Returns `false` when no entry had that identifier.
    async fn delete_by_id(&self, id: &EntryId) -> Result<bool, JournalEntryRepositoryError>;
}
