//! Kernel module - server infrastructure and dependencies.

pub mod ai;
pub mod deps;
pub mod stores;
pub mod test_dependencies;
pub mod traits;

/// GPT-4o - the model every support conversation runs on.
pub const GPT_4O: &str = "gpt-4o";

pub use ai::OpenAIChat;
pub use deps::ServerDeps;
pub use stores::{MemoryStore, PostgresStore};
pub use test_dependencies::{FailingAI, MockAI, ReadOnlyStore, RecordedChat, TestDependencies};
pub use traits::*;
