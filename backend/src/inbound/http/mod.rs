//! HTTP inbound adapter exposing the journal REST endpoints.

pub mod error;
pub mod health;
pub mod journal;
pub mod state;

use actix_web::web;

/// Register the journal routes under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(journal::submit_entry)
            .service(journal::list_entries)
            .service(journal::delete_entry_legacy)
            .service(journal::delete_entry),
    );
}
