//! Journal domain services.
//!
//! [`JournalCommandService`] runs the submission pipeline: validate, build the
//! prompt, call the generator under a deadline, normalize the reply, then
//! persist on a best-effort basis. [`JournalQueryService`] reads history.
//! Each pipeline stage emits a `debug!` event tagged with `stage`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, error, warn};

use crate::domain::ports::{
    DeleteEntryRequest, FeedbackGenerator, FeedbackGeneratorError, JournalCommand,
    JournalEntryRepository, JournalEntryRepositoryError, JournalQuery, ListEntriesRequest,
    ListEntriesResponse, SubmitEntryRequest, SubmitEntryResponse,
};
use crate::domain::{
    EntryId, Error, FeedbackPrompt, NewJournalEntry, NormalizationOutcome, SubmissionError,
    build_feedback_prompt, normalize_feedback,
};

/// Deadline applied to a single generation call.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

pub(crate) const MISSING_FIELDS_MESSAGE: &str = "Missing required fields.";
pub(crate) const UNSUPPORTED_FEELING_MESSAGE: &str = "Unsupported feeling.";

fn map_submission_error(error: SubmissionError) -> Error {
    match error {
        SubmissionError::MissingFields(fields) => Error::invalid_request(MISSING_FIELDS_MESSAGE)
            .with_details(json!({ "code": "missing_fields", "fields": fields })),
        SubmissionError::UnsupportedFeeling(value) => {
            Error::invalid_request(UNSUPPORTED_FEELING_MESSAGE)
                .with_details(json!({ "code": "unsupported_feeling", "value": value }))
        }
    }
}

fn map_generator_error(error: FeedbackGeneratorError) -> Error {
    error!(stage = "generation_failed", error = %error, "feedback generation failed");
    Error::generation_failed(format!("feedback generation failed: {error}"))
}

fn map_repository_error(error: JournalEntryRepositoryError) -> Error {
    match error {
        JournalEntryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("journal entry repository unavailable: {message}"))
        }
        JournalEntryRepositoryError::Query { message } => {
            Error::internal(format!("journal entry repository error: {message}"))
        }
    }
}

/// Journal service implementing the command driving port.
pub struct JournalCommandService<G, R> {
    generator: Arc<G>,
    journal_repo: Arc<R>,
    clock: Arc<dyn Clock>,
    generation_timeout: Duration,
}

impl<G, R> JournalCommandService<G, R> {
    /// Create a command service using [`DEFAULT_GENERATION_TIMEOUT`].
    pub fn new(generator: Arc<G>, journal_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            generator,
            journal_repo,
            clock,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    /// Override the generation deadline.
    #[must_use]
    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }
}

impl<G, R> JournalCommandService<G, R>
where
    G: FeedbackGenerator,
    R: JournalEntryRepository,
{
    async fn generate(&self, prompt: &FeedbackPrompt) -> Result<String, Error> {
        match tokio::time::timeout(self.generation_timeout, self.generator.generate(prompt)).await
        {
            Ok(result) => result.map_err(map_generator_error),
            Err(_) => Err(map_generator_error(FeedbackGeneratorError::timeout(
                format!("no reply within {} ms", self.generation_timeout.as_millis()),
            ))),
        }
    }

    async fn persist(&self, entry: &NewJournalEntry) -> Option<EntryId> {
        match self.journal_repo.insert(entry).await {
            Ok(id) => {
                debug!(stage = "persisted", entry_id = %id, "journal entry saved");
                Some(id)
            }
            Err(err) => {
                warn!(
                    stage = "persistence_failed",
                    user_id = %entry.user_id,
                    error = %err,
                    "journal entry not saved; returning feedback anyway"
                );
                None
            }
        }
    }
}

#[async_trait]
impl<G, R> JournalCommand for JournalCommandService<G, R>
where
    G: FeedbackGenerator,
    R: JournalEntryRepository,
{
    async fn submit_entry(
        &self,
        request: SubmitEntryRequest,
    ) -> Result<SubmitEntryResponse, Error> {
        let submission = request
            .submission
            .validate()
            .map_err(map_submission_error)?;
        debug!(
            stage = "validated",
            user_id = %submission.user_id(),
            feeling = %submission.feeling(),
            "journal submission accepted"
        );

        let prompt = build_feedback_prompt(
            submission.display_name(),
            submission.feeling(),
            submission.body_text(),
        );
        debug!(
            stage = "prompt_built",
            prompt_chars = prompt.as_str().chars().count(),
            "feedback prompt rendered"
        );

        let raw = self.generate(&prompt).await?;
        debug!(stage = "generated", reply_chars = raw.chars().count(), "model replied");

        let normalized = normalize_feedback(&raw);
        match normalized.outcome {
            NormalizationOutcome::Structured => debug!(
                stage = "normalized",
                keywords = normalized.feedback.keywords().len(),
                "model reply parsed"
            ),
            NormalizationOutcome::Fallback => warn!(
                stage = "normalized",
                "model reply was not structured; using its text as the summary"
            ),
        }

        let entry = submission.into_new_entry(normalized.feedback, self.clock.utc());
        let entry_id = self.persist(&entry).await;

        Ok(SubmitEntryResponse {
            feedback: entry.feedback,
            entry_id,
        })
    }

    async fn delete_entry(&self, request: DeleteEntryRequest) -> Result<(), Error> {
        let removed = self
            .journal_repo
            .delete_by_id(&request.entry_id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(Error::not_found(format!(
                "journal entry {} not found",
                request.entry_id
            )));
        }
        debug!(entry_id = %request.entry_id, "journal entry deleted");
        Ok(())
    }
}

/// Journal service implementing the query driving port.
#[derive(Clone)]
pub struct JournalQueryService<R> {
    journal_repo: Arc<R>,
}

impl<R> JournalQueryService<R> {
    pub fn new(journal_repo: Arc<R>) -> Self {
        Self { journal_repo }
    }
}

#[async_trait]
impl<R> JournalQuery for JournalQueryService<R>
where
    R: JournalEntryRepository,
{
    async fn list_entries(&self, request: ListEntriesRequest) -> Result<ListEntriesResponse, Error> {
        let entries = self
            .journal_repo
            .list_by_user(&request.user_id)
            .await
            .map_err(map_repository_error)?;
        Ok(ListEntriesResponse { entries })
    }
}

#[cfg(test)]
#[path = "journal_service_tests.rs"]
mod tests;
