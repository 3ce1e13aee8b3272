// Mindful Mind - API Core
//
// Backend for a student mental-health support service: an AI chat companion,
// a pseudonymous peer forum, and crisis-language screening with operator alerts.
//
// Domains live in domains/*, infrastructure (LLM provider, stores, DI) in kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
