use axum::extract::Extension;
use tracing::instrument;

use crate::domains::admin;
use crate::domains::safety::CrisisAlert;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ServiceResultExt};
use crate::server::extract::AppJson;

#[instrument(skip(state))]
pub async fn crisis_alerts_handler(
    Extension(state): Extension<AppState>,
) -> Result<AppJson<Vec<CrisisAlert>>, ApiError> {
    let alerts = admin::list_open_alerts(&state.deps)
        .await
        .or_api("Failed to retrieve crisis alerts")?;
    Ok(AppJson(alerts))
}
