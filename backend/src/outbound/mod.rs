//! Driven adapters: the text-generation client and journal storage.

pub mod ollama;
pub mod persistence;
