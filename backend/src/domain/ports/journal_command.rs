//! Driving port for journal mutations: submitting entries and deleting them.

use async_trait::async_trait;

use crate::domain::{EntryId, Error, GeneratedFeedback, JournalSubmission};

/// Request to generate feedback for a submission and record it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitEntryRequest {
    pub submission: JournalSubmission,
}

/// Feedback for a submission.
///
/// `entry_id` is `None` when the entry could not be saved; the feedback is
/// still returned in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitEntryResponse {
    pub feedback: GeneratedFeedback,
    pub entry_id: Option<EntryId>,
}

/// Request to delete one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteEntryRequest {
    pub entry_id: EntryId,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JournalCommand: Send + Sync {
    /// Validate, generate feedback, and persist on a best-effort basis.
    async fn submit_entry(&self, request: SubmitEntryRequest)
    -> Result<SubmitEntryResponse, Error>;

    /// Delete an entry, failing with `NotFound` when it does not exist.
    async fn delete_entry(&self, request: DeleteEntryRequest) -> Result<(), Error>;
}
