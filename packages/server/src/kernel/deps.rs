//! Server dependencies for domain actions (using traits for testability)
//!
//! This module provides the central dependency container used by all domain
//! actions and route handlers. External services sit behind trait objects so
//! tests can swap in `MemoryStore` and `MockAI`.

use std::sync::Arc;

use crate::kernel::{BaseAI, Store};

/// Server dependencies accessible to actions
#[derive(Clone)]
pub struct ServerDeps {
    pub store: Arc<dyn Store>,
    /// Chat-completion provider, already bound to its model
    pub ai: Arc<dyn BaseAI>,
}

impl ServerDeps {
    pub fn new(store: Arc<dyn Store>, ai: Arc<dyn BaseAI>) -> Self {
        Self { store, ai }
    }
}
