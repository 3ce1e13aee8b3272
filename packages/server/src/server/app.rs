//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    add_reply_handler, chat_handler, chat_history_handler, create_channels_post_handler,
    create_post_handler, crisis_alerts_handler, health_handler, list_channels_handler,
    list_posts_handler, root_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Build the CORS layer from the configured origins.
///
/// `*` allows any origin without credentials; an explicit list allows
/// credentials for exactly those origins.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
}

/// Build the Axum application router
///
/// Every route lives under `/api`.
pub fn build_app(deps: ServerDeps, cors_origins: &[String]) -> Router {
    let app_state = AppState {
        deps: Arc::new(deps),
    };

    Router::new()
        // Liveness, with and without the trailing slash
        .route("/api", get(root_handler))
        .route("/api/", get(root_handler))
        .route("/api/health", get(health_handler))
        // Chat
        .route("/api/chat", post(chat_handler))
        .route("/api/chat/history/:session_id", get(chat_history_handler))
        // Forum
        .route(
            "/api/forum/channels",
            get(list_channels_handler).post(create_channels_post_handler),
        )
        .route(
            "/api/forum/:channel",
            get(list_posts_handler).post(create_post_handler),
        )
        .route(
            "/api/forum/:channel/:post_id/reply",
            post(add_reply_handler),
        )
        // Admin
        .route("/api/admin/crisis-alerts", get(crisis_alerts_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}
