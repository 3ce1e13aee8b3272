use crate::common::{ServiceError, ServiceResult};
use crate::domains::safety::models::CrisisAlert;
use crate::kernel::ServerDeps;

/// Most alerts returned per request.
pub const ALERTS_LIMIT: i64 = 100;

/// Open crisis alerts, newest first.
pub async fn list_open_alerts(deps: &ServerDeps) -> ServiceResult<Vec<CrisisAlert>> {
    deps.store
        .open_alerts(ALERTS_LIMIT)
        .await
        .map_err(ServiceError::Storage)
}
