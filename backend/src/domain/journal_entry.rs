//! Journal entries and the feedback generated for them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DisplayName, Feeling, UserId};

/// Upper bound on keyword tags kept per feedback.
pub const MAX_KEYWORDS: usize = 5;

/// Store-assigned identifier of a persisted journal entry.
///
/// # Examples
/// ```
/// use unbothered_backend::domain::EntryId;
///
/// let id = EntryId::generate();
/// let parsed: EntryId = id.to_string().parse().expect("round trip");
/// assert_eq!(parsed, id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Mint a time-ordered identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A salient theme pulled out of the entry with a one-sentence explanation.
///
/// The explanation travels as `summary` on the wire, matching what the
/// journaling client and the generation prompt both expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTag {
    pub keyword: String,
    #[serde(rename = "summary")]
    pub explanation: String,
}

impl KeywordTag {
    pub fn new(keyword: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            explanation: explanation.into(),
        }
    }
}

/// Supportive summary plus keyword tags returned to the author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFeedback {
    summary: String,
    keywords: Vec<KeywordTag>,
}

impl GeneratedFeedback {
    /// Build feedback, keeping at most [`MAX_KEYWORDS`] tags in source order.
    pub fn new(summary: impl Into<String>, mut keywords: Vec<KeywordTag>) -> Self {
        keywords.truncate(MAX_KEYWORDS);
        Self {
            summary: summary.into(),
            keywords,
        }
    }

    /// Feedback with a summary and no keyword tags.
    pub fn summary_only(summary: impl Into<String>) -> Self {
        Self::new(summary, Vec::new())
    }

    pub fn summary(&self) -> &str {
        self.summary.as_str()
    }

    pub fn keywords(&self) -> &[KeywordTag] {
        &self.keywords
    }

    pub fn into_parts(self) -> (String, Vec<KeywordTag>) {
        (self.summary, self.keywords)
    }
}

/// Entry data ready to hand to a store, before an identifier is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJournalEntry {
    pub user_id: UserId,
    pub display_name: DisplayName,
    pub body_text: String,
    pub feeling: Feeling,
    pub feedback: GeneratedFeedback,
    pub created_at: DateTime<Utc>,
}

/// A persisted journal entry.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    id: EntryId,
    user_id: UserId,
    display_name: DisplayName,
    body_text: String,
    feeling: Feeling,
    feedback: GeneratedFeedback,
    created_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Attach a store-assigned identifier to entry data.
    pub fn from_new(id: EntryId, entry: NewJournalEntry) -> Self {
        let NewJournalEntry {
            user_id,
            display_name,
            body_text,
            feeling,
            feedback,
            created_at,
        } = entry;
        Self {
            id,
            user_id,
            display_name,
            body_text,
            feeling,
            feedback,
            created_at,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    pub fn body_text(&self) -> &str {
        self.body_text.as_str()
    }

    pub fn feeling(&self) -> Feeling {
        self.feeling
    }

    pub fn feedback(&self) -> &GeneratedFeedback {
        &self.feedback
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
