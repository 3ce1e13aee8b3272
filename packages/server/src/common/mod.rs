// Common types and utilities shared across the application

pub mod entity_ids;
pub mod errors;
pub mod id;

pub use entity_ids::*;
pub use errors::{ServiceError, ServiceResult};
pub use id::Id;

use chrono::{DateTime, SubsecRound, Utc};

/// Current UTC time at the precision the store keeps (microseconds), so a
/// timestamp returned to a client matches the one read back later.
pub fn utc_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
