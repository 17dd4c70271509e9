//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports (`JournalCommand`, `JournalQuery`) are what inbound adapters
//! call. Driven ports (`FeedbackGenerator`, `JournalEntryRepository`) are what
//! the domain calls out to. Each driven port exposes a typed error enum so
//! adapters map their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod feedback_generator;
mod journal_command;
mod journal_entry_repository;
mod journal_query;

#[cfg(test)]
pub use feedback_generator::MockFeedbackGenerator;
pub use feedback_generator::{
    FeedbackGenerator, FeedbackGeneratorError, FixtureFeedbackGenerator,
};
#[cfg(test)]
pub use journal_command::MockJournalCommand;
pub use journal_command::{
    DeleteEntryRequest, JournalCommand, SubmitEntryRequest, SubmitEntryResponse,
};
#[cfg(test)]
pub use journal_entry_repository::MockJournalEntryRepository;
pub use journal_entry_repository::{JournalEntryRepository, JournalEntryRepositoryError};
#[cfg(test)]
pub use journal_query::MockJournalQuery;
pub use journal_query::{JournalQuery, ListEntriesRequest, ListEntriesResponse};
