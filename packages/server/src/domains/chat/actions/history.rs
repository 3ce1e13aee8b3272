use crate::common::{ServiceError, ServiceResult};
use crate::domains::chat::models::ChatMessage;
use crate::kernel::ServerDeps;

/// Most turns returned for one session.
pub const HISTORY_LIMIT: i64 = 1000;

/// All turns of a session, oldest first.
pub async fn get_history(session_id: &str, deps: &ServerDeps) -> ServiceResult<Vec<ChatMessage>> {
    deps.store
        .session_history(session_id, HISTORY_LIMIT)
        .await
        .map_err(ServiceError::Storage)
}
