//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving
//! ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{JournalCommand, JournalQuery};

#[derive(Clone)]
pub struct HttpState {
    pub journal: Arc<dyn JournalCommand>,
    pub journal_query: Arc<dyn JournalQuery>,
}

impl HttpState {
    pub fn new(journal: Arc<dyn JournalCommand>, journal_query: Arc<dyn JournalQuery>) -> Self {
        Self {
            journal,
            journal_query,
        }
    }
}
