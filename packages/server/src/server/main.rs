// Main entry point for the Mindful Mind API server

use std::sync::Arc;

use anyhow::{Context, Result};
use mindful_core::kernel::{OpenAIChat, PostgresStore, ServerDeps, GPT_4O};
use mindful_core::{server::build_app, Config};
use openai_client::OpenAIClient;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mindful_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mindful Mind API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        database_name = config.database_name.as_deref().unwrap_or("(from DATABASE_URL)"),
        openai_api_key = mask(&config.openai_api_key),
        openai_base_url = config.openai_base_url.as_deref().unwrap_or("(default)"),
        llm_timeout_secs = config.llm_timeout.as_secs(),
        cors_origins = ?config.cors_origins,
        "Configuration loaded"
    );

    // Connect to database
    info!("Connecting to database...");
    let store = PostgresStore::connect(
        &config.database_url,
        config.database_name.as_deref(),
        config.database_max_connections,
    )
    .await?;
    info!("Database connected");

    store.migrate().await?;

    // Chat provider
    let mut client = OpenAIClient::new(config.openai_api_key.clone())
        .with_timeout(config.llm_timeout)
        .context("Failed to build OpenAI client")?;
    if let Some(base_url) = &config.openai_base_url {
        client = client.with_base_url(base_url.clone());
    }
    let ai = OpenAIChat::new(client, GPT_4O);

    let deps = ServerDeps::new(Arc::new(store.clone()), Arc::new(ai));
    let app = build_app(deps, &config.cors_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    info!("Starting server on {}", addr);
    info!("Health check: http://localhost:{}/api/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped, closing database pool");
    store.close().await;

    Ok(())
}

/// Show only enough of a secret to tell which one is configured.
fn mask(secret: &str) -> String {
    if secret.len() <= 8 {
        return "****".to_string();
    }
    let tail: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{tail}")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
