//! Validation of raw journal submissions.
//!
//! Inbound adapters collect whatever the client sent into a
//! [`JournalSubmission`]; [`JournalSubmission::validate`] turns it into a
//! [`ValidatedSubmission`] or reports every missing field at once.

use chrono::{DateTime, Utc};

use super::{DisplayName, Feeling, GeneratedFeedback, NewJournalEntry, UserId};

/// Wire names of the fields a submission must carry.
pub const FIELD_TEXT: &str = "text";
pub const FIELD_FEELING: &str = "feeling";
pub const FIELD_USER_ID: &str = "userId";
pub const FIELD_NAME: &str = "name";

/// Unvalidated submission as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalSubmission {
    pub text: Option<String>,
    pub feeling: Option<String>,
    pub user_id: Option<String>,
    pub name: Option<String>,
}

/// Reasons a submission is rejected before any generation work starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("unsupported feeling: {0}")]
    UnsupportedFeeling(String),
}

/// Submission whose fields are present and well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    user_id: UserId,
    display_name: DisplayName,
    body_text: String,
    feeling: Feeling,
}

impl ValidatedSubmission {
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

    /// Combine the submission with its feedback into storable entry data.
    pub fn into_new_entry(
        self,
        feedback: GeneratedFeedback,
        created_at: DateTime<Utc>,
    ) -> NewJournalEntry {
        NewJournalEntry {
            user_id: self.user_id,
            display_name: self.display_name,
            body_text: self.body_text,
            feeling: self.feeling,
            feedback,
            created_at,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl JournalSubmission {
    /// Check presence of every field, then the feeling label.
    ///
    /// Blank strings count as missing. The entry text and display name are kept
    /// verbatim; the user id is trimmed.
    ///
    /// # Examples
    /// ```
    /// use unbothered_backend::domain::{JournalSubmission, SubmissionError};
    ///
    /// let err = JournalSubmission {
    ///     text: Some("Long day.".into()),
    ///     feeling: None,
    ///     user_id: Some("1".into()),
    ///     name: Some("  ".into()),
    /// }
    /// .validate()
    /// .expect_err("fields missing");
    /// assert_eq!(err, SubmissionError::MissingFields(vec!["feeling", "name"]));
    /// ```
    pub fn validate(self) -> Result<ValidatedSubmission, SubmissionError> {
        let text = non_blank(self.text);
        let feeling = non_blank(self.feeling);
        let user_id = non_blank(self.user_id).and_then(|raw| UserId::new(raw).ok());
        let name = non_blank(self.name).and_then(|raw| DisplayName::new(raw).ok());

        match (text, feeling, user_id, name) {
            (Some(body_text), Some(feeling), Some(user_id), Some(display_name)) => {
                let feeling = feeling
                    .parse::<Feeling>()
                    .map_err(|err| SubmissionError::UnsupportedFeeling(err.0))?;
                Ok(ValidatedSubmission {
                    user_id,
                    display_name,
                    body_text,
                    feeling,
                })
            }
            (text, feeling, user_id, name) => {
                let missing = [
                    (FIELD_TEXT, text.is_none()),
                    (FIELD_FEELING, feeling.is_none()),
                    (FIELD_USER_ID, user_id.is_none()),
                    (FIELD_NAME, name.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field))
                .collect();
                Err(SubmissionError::MissingFields(missing))
            }
        }
    }
}
