//! Unbothered journal backend.
//!
//! Accepts journal entries, asks a text-generation service for supportive
//! feedback, and keeps each entry's history for its author.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
