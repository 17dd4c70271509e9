//! Domain primitives, services, and ports.
//!
//! Purpose: hold the journaling rules independent of HTTP, the database, and
//! the text-generation service. Adapters live under `inbound` and `outbound`
//! and meet the domain only through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Feeling, UserId, DisplayName: validated submission fields.
//! - JournalEntry, NewJournalEntry, GeneratedFeedback, KeywordTag: entries and
//!   their feedback.
//! - JournalSubmission: raw submission plus validation.
//! - build_feedback_prompt / normalize_feedback: the text pipeline around the
//!   model call.
//! - JournalCommandService / JournalQueryService: driving port
//!   implementations.

pub mod error;
pub mod feeling;
pub mod journal_entry;
pub mod journal_service;
pub mod normalizer;
pub mod ports;
pub mod prompt;
pub mod submission;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode};
pub use self::feeling::{Feeling, UnsupportedFeeling};
pub use self::journal_entry::{
    EntryId, GeneratedFeedback, JournalEntry, KeywordTag, MAX_KEYWORDS, NewJournalEntry,
};
pub use self::journal_service::{
    DEFAULT_GENERATION_TIMEOUT, JournalCommandService, JournalQueryService,
};
pub use self::normalizer::{NormalizationOutcome, NormalizedFeedback, normalize_feedback};
pub use self::prompt::{FeedbackPrompt, MAX_ENTRY_CHARS, MAX_NAME_CHARS, build_feedback_prompt};
pub use self::submission::{JournalSubmission, SubmissionError, ValidatedSubmission};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{DisplayName, UserId, UserValidationError};
