//! HTTP adapter mapping for domain errors.
//!
//! The domain error type stays HTTP-agnostic. [`Error`] gets a generic JSON
//! rendering; [`JournalError`] renders the envelopes the journaling client
//! parses.

use actix_web::{HttpResponse, HttpResponseBuilder, ResponseError, http::StatusCode};
use serde_json::json;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

pub(crate) const GENERATION_FAILED_SUMMARY: &str = "Error generating advice.";
pub(crate) const LIST_FAILED_MESSAGE: &str = "Failed to fetch journal entries.";
pub(crate) const ENTRY_NOT_FOUND_MESSAGE: &str = "Entry not found";
pub(crate) const DELETE_FAILED_MESSAGE: &str = "Failed to delete entry";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::GenerationFailed | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

fn response_builder(status: StatusCode, error: &Error) -> HttpResponseBuilder {
    let mut builder = HttpResponse::build(status);
    if let Some(id) = error.trace_id() {
        builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
    }
    builder
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        response_builder(self.status_code(), self).json(redact_if_internal(self))
    }
}

/// Journal endpoint failure, tagged with the operation that failed.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("journal submission failed: {0}")]
    Submission(Error),
    #[error("journal listing failed: {0}")]
    Listing(Error),
    #[error("journal deletion failed: {0}")]
    Deletion(Error),
}

impl JournalError {
    fn inner(&self) -> &Error {
        match self {
            Self::Submission(error) | Self::Listing(error) | Self::Deletion(error) => error,
        }
    }
}

impl ResponseError for JournalError {
    /// Client errors keep their status; everything else is a 500.
    fn status_code(&self) -> StatusCode {
        let inner = self.inner();
        match (self, inner.code()) {
            (Self::Submission(_), ErrorCode::InvalidRequest)
            | (Self::Deletion(_), ErrorCode::NotFound) => inner.status_code(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let inner = self.inner();
        let body = match (self, inner.code()) {
            (Self::Submission(_), ErrorCode::InvalidRequest) => {
                json!({ "summary": inner.message(), "keywords": [] })
            }
            (Self::Submission(_), _) => {
                json!({ "summary": GENERATION_FAILED_SUMMARY, "keywords": [] })
            }
            (Self::Listing(_), _) => json!({ "error": LIST_FAILED_MESSAGE }),
            (Self::Deletion(_), ErrorCode::NotFound) => json!({ "error": ENTRY_NOT_FOUND_MESSAGE }),
            (Self::Deletion(_), _) => json!({ "error": DELETE_FAILED_MESSAGE }),
        };
        response_builder(self.status_code(), inner).json(body)
    }
}
