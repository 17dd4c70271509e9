//! Journal entry persistence adapters.
//!
//! - [`DieselJournalEntryRepository`]: PostgreSQL via Diesel with async
//!   support through `diesel-async` and a `bb8` pool.
//! - [`InMemoryJournalEntryRepository`]: a process-local store for running
//!   without a database.
//!
//! Diesel row structs and the schema stay private to this module; the
//! repositories translate between rows and domain entries.
//!
//! # Example
//!
//! ```no_run
//! use unbothered_backend::outbound::persistence::{
//!     DbPool, DieselJournalEntryRepository, PoolConfig,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/journal")).await?;
//! let repo = DieselJournalEntryRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_journal_entry_repository;
mod error_mapping;
mod in_memory_journal_entry_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_journal_entry_repository::DieselJournalEntryRepository;
pub use in_memory_journal_entry_repository::InMemoryJournalEntryRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
