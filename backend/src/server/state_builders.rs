//! Builders wiring adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use unbothered_backend::domain::ports::{FeedbackGenerator, JournalEntryRepository};
use unbothered_backend::domain::{JournalCommandService, JournalQueryService};
use unbothered_backend::inbound::http::state::HttpState;
use unbothered_backend::outbound::ollama::OllamaFeedbackGenerator;
use unbothered_backend::outbound::persistence::{
    DieselJournalEntryRepository, InMemoryJournalEntryRepository,
};

use super::ServerConfig;

fn journal_state<G, R>(generator: Arc<G>, repo: Arc<R>, config: &ServerConfig) -> HttpState
where
    G: FeedbackGenerator + 'static,
    R: JournalEntryRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let command = JournalCommandService::new(generator, Arc::clone(&repo), clock)
        .with_generation_timeout(config.generation_timeout);
    let query = JournalQueryService::new(repo);
    HttpState::new(Arc::new(command), Arc::new(query))
}

/// Build the HTTP state for the configured store and generator.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the generation client cannot be built.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let generator = OllamaFeedbackGenerator::new(config.ollama.clone())
        .map_err(|err| std::io::Error::other(format!("generation client setup failed: {err}")))?;
    info!(url = %generator.generate_url(), model = %config.ollama.model, "generation client ready");
    let generator = Arc::new(generator);

    let state = match &config.db_pool {
        Some(pool) => {
            let repo = Arc::new(DieselJournalEntryRepository::new(pool.clone()));
            journal_state(generator, repo, config)
        }
        None => {
            warn!("no database configured; journal entries are kept in memory");
            journal_state(generator, Arc::new(InMemoryJournalEntryRepository::new()), config)
        }
    };
    Ok(web::Data::new(state))
}
