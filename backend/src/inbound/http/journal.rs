//! Journal HTTP handlers.
//!
//! ```text
//! POST   /api/journal
//! GET    /api/journal/{user_id}
//! DELETE /api/journal/{id}
//! DELETE /api/journal/delete/{id}
//! ```
//!
//! Request and response field names follow what the journaling client
//! already sends and parses.

use actix_web::{delete, get, post, web};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::domain::ports::{DeleteEntryRequest, ListEntriesRequest, SubmitEntryRequest};
use crate::domain::{
    EntryId, Error, ErrorCode, GeneratedFeedback, JournalEntry, JournalSubmission, UserId,
};
use crate::inbound::http::error::JournalError;
use crate::inbound::http::state::HttpState;

pub(crate) const ENTRY_DELETED_MESSAGE: &str = "Entry deleted successfully";

/// User identifier as sent by clients: either text or a JSON number.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum UserIdBody {
    Text(String),
    Number(serde_json::Number),
}

impl From<UserIdBody> for String {
    fn from(value: UserIdBody) -> Self {
        match value {
            UserIdBody::Text(text) => text,
            UserIdBody::Number(number) => number.to_string(),
        }
    }
}

/// Request payload for a journal submission. Every field is required; absent
/// fields are reported together.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JournalSubmissionBody {
    pub text: Option<String>,
    /// One of Happy, Sad, Angry, Anxious, Tired, Grateful, Stressed,
    /// Motivated, Miserable (case-insensitive).
    pub feeling: Option<String>,
    #[schema(value_type = Option<String>)]
    pub user_id: Option<UserIdBody>,
    pub name: Option<String>,
}

impl From<JournalSubmissionBody> for JournalSubmission {
    fn from(body: JournalSubmissionBody) -> Self {
        Self {
            text: body.text,
            feeling: body.feeling,
            user_id: body.user_id.map(String::from),
            name: body.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct KeywordBody {
    pub keyword: String,
    /// One-sentence cause-and-effect explanation.
    pub summary: String,
}

/// Feedback payload. Error responses reuse this shape with an empty
/// `keywords` list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct FeedbackResponseBody {
    pub summary: String,
    pub keywords: Vec<KeywordBody>,
}

impl From<&GeneratedFeedback> for FeedbackResponseBody {
    fn from(feedback: &GeneratedFeedback) -> Self {
        Self {
            summary: feedback.summary().to_owned(),
            keywords: feedback
                .keywords()
                .iter()
                .map(|tag| KeywordBody {
                    keyword: tag.keyword.clone(),
                    summary: tag.explanation.clone(),
                })
                .collect(),
        }
    }
}

/// Stored entry as listed for its author.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct JournalEntryBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub text: String,
    pub feeling: String,
    pub summary: String,
    pub keywords: Vec<KeywordBody>,
    #[schema(format = "date-time")]
    pub date_created: String,
}

impl From<&JournalEntry> for JournalEntryBody {
    fn from(entry: &JournalEntry) -> Self {
        let feedback = FeedbackResponseBody::from(entry.feedback());
        Self {
            id: entry.id().to_string(),
            user_id: entry.user_id().to_string(),
            name: entry.display_name().to_string(),
            text: entry.body_text().to_owned(),
            feeling: entry.feeling().to_string(),
            summary: feedback.summary,
            keywords: feedback.keywords,
            date_created: entry
                .created_at()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ErrorMessageBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct DeletedBody {
    pub message: String,
}

/// Generate supportive feedback for a journal entry and save it.
///
/// A body that cannot be read as JSON is treated as having no fields.
#[utoipa::path(
    post,
    path = "/api/journal",
    request_body = JournalSubmissionBody,
    responses(
        (status = 200, description = "Feedback generated", body = FeedbackResponseBody),
        (status = 400, description = "Missing fields or unsupported feeling", body = FeedbackResponseBody),
        (status = 500, description = "Generation failed", body = FeedbackResponseBody)
    ),
    tags = ["journal"],
    operation_id = "submitJournalEntry"
)]
#[post("/journal")]
pub async fn submit_entry(
    state: web::Data<HttpState>,
    payload: Result<web::Json<JournalSubmissionBody>, actix_web::Error>,
) -> Result<web::Json<FeedbackResponseBody>, JournalError> {
    let body = payload.map(web::Json::into_inner).unwrap_or_else(|err| {
        debug!(error = %err, "unreadable journal submission body");
        JournalSubmissionBody::default()
    });

    let response = state
        .journal
        .submit_entry(SubmitEntryRequest {
            submission: body.into(),
        })
        .await
        .map_err(JournalError::Submission)?;

    Ok(web::Json(FeedbackResponseBody::from(&response.feedback)))
}

/// List a user's entries, newest first.
#[utoipa::path(
    get,
    path = "/api/journal/{user_id}",
    params(("user_id" = String, Path, description = "Author identifier")),
    responses(
        (status = 200, description = "Entries, newest first", body = [JournalEntryBody]),
        (status = 500, description = "Store unavailable", body = ErrorMessageBody)
    ),
    tags = ["journal"],
    operation_id = "listJournalEntries"
)]
#[get("/journal/{user_id}")]
pub async fn list_entries(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> Result<web::Json<Vec<JournalEntryBody>>, JournalError> {
    // A blank identifier cannot own entries.
    let Ok(user_id) = UserId::new(path.into_inner()) else {
        return Ok(web::Json(Vec::new()));
    };

    let response = state
        .journal_query
        .list_entries(ListEntriesRequest { user_id })
        .await
        .map_err(|err| {
            error!(error = %err, code = ?err.code(), "listing journal entries failed");
            JournalError::Listing(err)
        })?;

    Ok(web::Json(
        response.entries.iter().map(JournalEntryBody::from).collect(),
    ))
}

async fn delete_by_raw_id(
    state: &HttpState,
    raw_id: &str,
) -> Result<web::Json<DeletedBody>, JournalError> {
    let entry_id = raw_id.parse::<EntryId>().map_err(|_| {
        JournalError::Deletion(Error::not_found(format!("journal entry {raw_id} not found")))
    })?;

    state
        .journal
        .delete_entry(DeleteEntryRequest { entry_id })
        .await
        .map_err(|err| {
            if err.code() != ErrorCode::NotFound {
                error!(error = %err, code = ?err.code(), "deleting journal entry failed");
            }
            JournalError::Deletion(err)
        })?;

    Ok(web::Json(DeletedBody {
        message: ENTRY_DELETED_MESSAGE.to_owned(),
    }))
}

/// Delete an entry by identifier.
#[utoipa::path(
    delete,
    path = "/api/journal/{id}",
    params(("id" = String, Path, description = "Entry identifier")),
    responses(
        (status = 200, description = "Entry deleted", body = DeletedBody),
        (status = 404, description = "No entry with that identifier", body = ErrorMessageBody),
        (status = 500, description = "Store unavailable", body = ErrorMessageBody)
    ),
    tags = ["journal"],
    operation_id = "deleteJournalEntry"
)]
#[delete("/journal/{id}")]
pub async fn delete_entry(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> Result<web::Json<DeletedBody>, JournalError> {
    delete_by_raw_id(&state, &path.into_inner()).await
}

/// Older clients call this path; behaviour matches `DELETE /api/journal/{id}`.
#[utoipa::path(
    delete,
    path = "/api/journal/delete/{id}",
    params(("id" = String, Path, description = "Entry identifier")),
    responses(
        (status = 200, description = "Entry deleted", body = DeletedBody),
        (status = 404, description = "No entry with that identifier", body = ErrorMessageBody),
        (status = 500, description = "Store unavailable", body = ErrorMessageBody)
    ),
    tags = ["journal"],
    operation_id = "deleteJournalEntryLegacy"
)]
#[delete("/journal/delete/{id}")]
pub async fn delete_entry_legacy(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> Result<web::Json<DeletedBody>, JournalError> {
    delete_by_raw_id(&state, &path.into_inner()).await
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;
