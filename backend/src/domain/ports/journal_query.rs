//! Driving port for reading an author's journal history.

use async_trait::async_trait;

use crate::domain::{Error, JournalEntry, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntriesRequest {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListEntriesResponse {
    /// Newest first.
    pub entries: Vec<JournalEntry>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JournalQuery: Send + Sync {
    async fn list_entries(&self, request: ListEntriesRequest) -> Result<ListEntriesResponse, Error>;
}
