//! Process-local `JournalEntryRepository` used when no database is configured.
//!
//! Entries live in a `Vec` in insertion order and are lost on restart.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{JournalEntryRepository, JournalEntryRepositoryError};
use crate::domain::{EntryId, JournalEntry, NewJournalEntry, UserId};

#[derive(Debug, Default)]
pub struct InMemoryJournalEntryRepository {
    entries: Mutex<Vec<JournalEntry>>,
}

impl InMemoryJournalEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<JournalEntry>>, JournalEntryRepositoryError> {
        self.entries
            .lock()
            .map_err(|_| JournalEntryRepositoryError::query("journal entry store lock poisoned"))
    }
}

#[async_trait]
impl JournalEntryRepository for InMemoryJournalEntryRepository {
    async fn insert(&self, entry: &NewJournalEntry) -> Result<EntryId, JournalEntryRepositoryError> {
        let id = EntryId::generate();
        self.lock()?
            .push(JournalEntry::from_new(id, entry.clone()));
        Ok(id)
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<JournalEntry>, JournalEntryRepositoryError> {
        let guard = self.lock()?;
        // Newest insert first, then a stable sort keeps that order for ties.
        let mut entries: Vec<JournalEntry> = guard
            .iter()
            .rev()
            .filter(|entry| entry.user_id() == user_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(entries)
    }

    async fn delete_by_id(&self, id: &EntryId) -> Result<bool, JournalEntryRepositoryError> {
        let mut guard = self.lock()?;
        let before = guard.len();
        guard.retain(|entry| entry.id() != *id);
        Ok(guard.len() != before)
    }
}
