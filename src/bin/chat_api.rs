//! Chat with Data API Server
//!
//! Natural-language to DAX templates plus a Groq chat-completion proxy.
//!
//! Usage:
//!   cargo run --bin chat_api
//!
//! Environment (a `.env` file in the working directory is loaded first):
//!   PORT / CHAT_API_PORT - Server port (default: 8000)
//!   CHAT_API_HOST        - Server host (default: 0.0.0.0)
//!   PBI_SCHEMA_PATH      - Power BI schema JSON (default: pbi_schema.json)
//!   CORS_ALLOW_ORIGINS   - Comma-separated origins (default: http://localhost:3000)
//!   APP_NAME             - Display name (default: Chat with Data)
//!   GROQ_API_KEY         - Enables the chat proxy when set
//!   GROQ_MODEL           - Model override
//!   GROQ_TIMEOUT_SECS    - Upstream timeout (default: none)
//!   RUST_LOG             - Log filter (default: info)

use chat_with_data::api::{create_router, AppState};
use chat_with_data::{AppConfig, GroqService, Schema};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Missing .env is fine; real environment variables still apply
    dotenv::dotenv().ok();

    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env()?;

    // Schema failures degrade /api/powerbi/local-schema to 404
    let schema = match Schema::load(&config.schema_path) {
        Ok(schema) => schema,
        Err(e) => {
            error!(code = e.code_str(), "Failed to load {}: {}", config.schema_path, e.message);
            Schema::empty()
        }
    };

    // A missing key disables the chat proxy, it does not stop the server
    let groq = match GroqService::from_env() {
        Ok(service) => {
            info!("✅ groq service initialized successfully");
            Some(service)
        }
        Err(e) => {
            warn!(code = e.code_str(), "groq service not available: {}", e.message);
            None
        }
    };

    let addr: SocketAddr = config.bind_addr().parse()?;
    let state = Arc::new(AppState::new(config, schema, groq));
    info!(
        groq_available = state.capabilities.groq_available,
        schema_loaded = state.capabilities.schema_loaded,
        "Capabilities resolved"
    );

    let app = create_router(state);

    info!("🚀 Chat with Data API starting on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /                          - Service info");
    info!("  GET  /health                    - Health check");
    info!("  GET  /api/config                - Configuration status");
    info!("  GET  /api/powerbi/local-schema  - Loaded Power BI schema");
    info!("  POST /api/powerbi/query-natural - Natural language to DAX");
    info!("  POST /api/chat                  - Groq chat completion");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("👋 Chat with Data API shutdown complete");
    Ok(())
}
