//! Tests for the journal services.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::ports::{MockFeedbackGenerator, MockJournalEntryRepository};
use crate::domain::{
    DisplayName, ErrorCode, Feeling, GeneratedFeedback, JournalEntry, JournalSubmission,
    KeywordTag, UserId,
};

struct FixtureClock(DateTime<Utc>);

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Generator that never answers within any reasonable deadline.
struct StalledGenerator;

#[async_trait]
impl FeedbackGenerator for StalledGenerator {
    async fn generate(&self, _prompt: &FeedbackPrompt) -> Result<String, FeedbackGeneratorError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(String::new())
    }
}

const STRUCTURED_REPLY: &str = "```json\n{\"summary\":\"Sam, that sounds exhausting.\",\"keywords\":[{\"keyword\":\"exam\",\"summary\":\"The exam caused the stress.\"}]}\n```";

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn submission() -> JournalSubmission {
    JournalSubmission {
        text: Some("Failed my exam and cried on the bus.".to_owned()),
        feeling: Some("sad".to_owned()),
        user_id: Some("42".to_owned()),
        name: Some("Sam".to_owned()),
    }
}

fn command_service<G, R>(
    generator: G,
    repo: R,
    now: DateTime<Utc>,
) -> JournalCommandService<G, R> {
    JournalCommandService::new(Arc::new(generator), Arc::new(repo), Arc::new(FixtureClock(now)))
}

fn sample_entry(id: EntryId, created_at: DateTime<Utc>) -> JournalEntry {
    JournalEntry::from_new(
        id,
        NewJournalEntry {
            user_id: UserId::new("42").expect("user id"),
            display_name: DisplayName::new("Sam").expect("name"),
            body_text: "Quiet day.".to_owned(),
            feeling: Feeling::Tired,
            feedback: GeneratedFeedback::summary_only("Rest up."),
            created_at,
        },
    )
}

#[rstest]
#[tokio::test]
async fn submit_entry_returns_feedback_and_persists_it(
    submission: JournalSubmission,
    now: DateTime<Utc>,
) {
    let mut generator = MockFeedbackGenerator::new();
    generator
        .expect_generate()
        .withf(|prompt| prompt.as_str().contains("name: \"Sam\"") && prompt.as_str().contains("feeling: Sad"))
        .times(1)
        .return_once(|_| Ok(STRUCTURED_REPLY.to_owned()));

    let assigned = EntryId::generate();
    let mut repo = MockJournalEntryRepository::new();
    repo.expect_insert()
        .withf(move |entry| {
            entry.created_at == now
                && entry.feeling == Feeling::Sad
                && entry.user_id.as_ref() == "42"
                && entry.feedback.summary() == "Sam, that sounds exhausting."
        })
        .times(1)
        .return_once(move |_| Ok(assigned));

    let service = command_service(generator, repo, now);
    let response = service
        .submit_entry(SubmitEntryRequest { submission })
        .await
        .expect("submission succeeds");

    assert_eq!(response.entry_id, Some(assigned));
    assert_eq!(response.feedback.summary(), "Sam, that sounds exhausting.");
    assert_eq!(
        response.feedback.keywords(),
        [KeywordTag::new("exam", "The exam caused the stress.")]
    );
}

#[rstest]
#[tokio::test]
async fn submit_entry_rejects_missing_fields_without_side_effects(now: DateTime<Utc>) {
    let mut generator = MockFeedbackGenerator::new();
    generator.expect_generate().times(0);
    let mut repo = MockJournalEntryRepository::new();
    repo.expect_insert().times(0);

    let service = command_service(generator, repo, now);
    let error = service
        .submit_entry(SubmitEntryRequest {
            submission: JournalSubmission {
                text: Some("Only text.".to_owned()),
                ..JournalSubmission::default()
            },
        })
        .await
        .expect_err("missing fields");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), MISSING_FIELDS_MESSAGE);
    assert_eq!(
        error.details().map(|d| d["fields"].clone()),
        Some(json!(["feeling", "userId", "name"]))
    );
}

#[rstest]
#[tokio::test]
async fn submit_entry_rejects_unknown_feeling(submission: JournalSubmission, now: DateTime<Utc>) {
    let mut generator = MockFeedbackGenerator::new();
    generator.expect_generate().times(0);
    let mut repo = MockJournalEntryRepository::new();
    repo.expect_insert().times(0);

    let service = command_service(generator, repo, now);
    let error = service
        .submit_entry(SubmitEntryRequest {
            submission: JournalSubmission {
                feeling: Some("Bored".to_owned()),
                ..submission
            },
        })
        .await
        .expect_err("unsupported feeling");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), UNSUPPORTED_FEELING_MESSAGE);
}

#[rstest]
#[case::status(FeedbackGeneratorError::status(500_u16, "model not loaded"))]
#[case::transport(FeedbackGeneratorError::transport("connection refused"))]
#[case::decode(FeedbackGeneratorError::decode("missing response"))]
#[tokio::test]
async fn submit_entry_maps_generator_failures(
    submission: JournalSubmission,
    now: DateTime<Utc>,
    #[case] failure: FeedbackGeneratorError,
) {
    let mut generator = MockFeedbackGenerator::new();
    generator
        .expect_generate()
        .times(1)
        .return_once(move |_| Err(failure));
    let mut repo = MockJournalEntryRepository::new();
    repo.expect_insert().times(0);

    let service = command_service(generator, repo, now);
    let error = service
        .submit_entry(SubmitEntryRequest { submission })
        .await
        .expect_err("generation fails");

    assert_eq!(error.code(), ErrorCode::GenerationFailed);
}

#[rstest]
#[tokio::test]
async fn submit_entry_times_out_slow_generation(submission: JournalSubmission, now: DateTime<Utc>) {
    let mut repo = MockJournalEntryRepository::new();
    repo.expect_insert().times(0);

    let service = command_service(StalledGenerator, repo, now)
        .with_generation_timeout(Duration::from_millis(20));
    let error = service
        .submit_entry(SubmitEntryRequest { submission })
        .await
        .expect_err("deadline exceeded");

    assert_eq!(error.code(), ErrorCode::GenerationFailed);
    assert!(error.message().contains("timed out"));
}

#[rstest]
#[tokio::test]
async fn submit_entry_returns_feedback_when_persistence_fails(
    submission: JournalSubmission,
    now: DateTime<Utc>,
) {
    let mut generator = MockFeedbackGenerator::new();
    generator
        .expect_generate()
        .times(1)
        .return_once(|_| Ok(STRUCTURED_REPLY.to_owned()));
    let mut repo = MockJournalEntryRepository::new();
    repo.expect_insert()
        .times(1)
        .return_once(|_| Err(JournalEntryRepositoryError::connection("database down")));

    let service = command_service(generator, repo, now);
    let response = service
        .submit_entry(SubmitEntryRequest { submission })
        .await
        .expect("feedback still returned");

    assert_eq!(response.entry_id, None);
    assert_eq!(response.feedback.summary(), "Sam, that sounds exhausting.");
}

#[rstest]
#[tokio::test]
async fn submit_entry_uses_prose_reply_as_summary(
    submission: JournalSubmission,
    now: DateTime<Utc>,
) {
    let mut generator = MockFeedbackGenerator::new();
    generator
        .expect_generate()
        .times(1)
        .return_once(|_| Ok("  Sam, be gentle with yourself today.  ".to_owned()));
    let mut repo = MockJournalEntryRepository::new();
    repo.expect_insert()
        .withf(|entry| entry.feedback.keywords().is_empty())
        .times(1)
        .return_once(|_| Ok(EntryId::generate()));

    let service = command_service(generator, repo, now);
    let response = service
        .submit_entry(SubmitEntryRequest { submission })
        .await
        .expect("fallback feedback");

    assert_eq!(
        response.feedback.summary(),
        "Sam, be gentle with yourself today."
    );
    assert!(response.feedback.keywords().is_empty());
}

#[rstest]
#[case::removed(Ok(true), None)]
#[case::absent(Ok(false), Some(ErrorCode::NotFound))]
#[case::offline(
    Err(JournalEntryRepositoryError::connection("pool timed out")),
    Some(ErrorCode::ServiceUnavailable)
)]
#[case::broken(
    Err(JournalEntryRepositoryError::query("syntax error")),
    Some(ErrorCode::InternalError)
)]
#[tokio::test]
async fn delete_entry_maps_repository_outcomes(
    now: DateTime<Utc>,
    #[case] outcome: Result<bool, JournalEntryRepositoryError>,
    #[case] expected: Option<ErrorCode>,
) {
    let entry_id = EntryId::generate();
    let mut generator = MockFeedbackGenerator::new();
    generator.expect_generate().times(0);
    let mut repo = MockJournalEntryRepository::new();
    repo.expect_delete_by_id()
        .withf(move |id| *id == entry_id)
        .times(1)
        .return_once(move |_| outcome);

    let service = command_service(generator, repo, now);
    let result = service.delete_entry(DeleteEntryRequest { entry_id }).await;

    assert_eq!(result.err().map(|err| err.code()), expected);
}

#[rstest]
#[tokio::test]
async fn list_entries_returns_repository_order(now: DateTime<Utc>) {
    let newer = sample_entry(EntryId::generate(), now);
    let older = sample_entry(EntryId::generate(), now - chrono::Duration::hours(1));
    let expected = vec![newer.clone(), older.clone()];

    let mut repo = MockJournalEntryRepository::new();
    repo.expect_list_by_user()
        .withf(|user_id| user_id.as_ref() == "42")
        .times(1)
        .return_once(move |_| Ok(vec![newer, older]));

    let service = JournalQueryService::new(Arc::new(repo));
    let response = service
        .list_entries(ListEntriesRequest {
            user_id: UserId::new("42").expect("user id"),
        })
        .await
        .expect("listing succeeds");

    assert_eq!(response.entries, expected);
}

#[rstest]
#[tokio::test]
async fn list_entries_maps_query_failure_to_internal() {
    let mut repo = MockJournalEntryRepository::new();
    repo.expect_list_by_user()
        .times(1)
        .return_once(|_| Err(JournalEntryRepositoryError::query("relation missing")));

    let service = JournalQueryService::new(Arc::new(repo));
    let error = service
        .list_entries(ListEntriesRequest {
            user_id: UserId::new("42").expect("user id"),
        })
        .await
        .expect_err("query fails");

    assert_eq!(error.code(), ErrorCode::InternalError);
}
