//! Safety domain - crisis-language screening and the alerts it raises.

pub mod crisis;
pub mod models;

pub use crisis::{detect_crisis, with_crisis_resources, CRISIS_KEYWORDS, CRISIS_RESOURCES_NOTICE};
pub use models::*;
