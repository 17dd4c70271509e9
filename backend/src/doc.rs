//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the journal endpoints, the health probes, and the
//! request/response bodies they exchange. Swagger UI serves it in debug
//! builds, and `cargo run --bin openapi-dump` prints it for tooling.

use utoipa::OpenApi;

use crate::inbound::http::journal::{
    DeletedBody, ErrorMessageBody, FeedbackResponseBody, JournalEntryBody, JournalSubmissionBody,
    KeywordBody,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Unbothered journal API",
        description = "Supportive feedback for journal entries, plus entry history and deletion."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::journal::submit_entry,
        crate::inbound::http::journal::list_entries,
        crate::inbound::http::journal::delete_entry,
        crate::inbound::http::journal::delete_entry_legacy,
        crate::inbound::http::health::index,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        JournalSubmissionBody,
        FeedbackResponseBody,
        KeywordBody,
        JournalEntryBody,
        ErrorMessageBody,
        DeletedBody
    )),
    tags(
        (name = "journal", description = "Journal submission, history, and deletion"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
