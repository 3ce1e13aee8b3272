use std::collections::BTreeSet;

use crate::common::{ServiceError, ServiceResult};
use crate::kernel::ServerDeps;

/// Channels advertised even before anyone has posted in them.
pub const DEFAULT_CHANNELS: &[&str] = &[
    "general",
    "anxiety",
    "depression",
    "study-stress",
    "relationships",
];

/// Default channels plus every channel that has posts, sorted and deduplicated.
///
/// Posting to a new channel name creates it; it stays listed from then on.
pub async fn list_channels(deps: &ServerDeps) -> ServiceResult<Vec<String>> {
    let stored = deps
        .store
        .distinct_channels()
        .await
        .map_err(ServiceError::Storage)?;
    Ok(merge_channels(stored))
}

fn merge_channels(stored: Vec<String>) -> Vec<String> {
    DEFAULT_CHANNELS
        .iter()
        .map(|c| c.to_string())
        .chain(stored)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
