use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mailer_api::config::Config;
use mailer_api::llm_client::{self, GeminiClient};
use mailer_api::mail::dispatch::SmtpMailer;
use mailer_api::routes::{build_router, cors_layer};
use mailer_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mailer API v{}", env!("CARGO_PKG_VERSION"));

    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

    // Initialize LLM client
    let llm = GeminiClient::new(config.gemini_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize SMTP transport
    let mailer = SmtpMailer::new(
        &config.smtp_host,
        config.email_user.clone(),
        config.email_pass.clone(),
    )
    .context("Failed to configure SMTP transport")?;
    info!("SMTP transport initialized (relay: {})", config.smtp_host);

    let state = AppState {
        llm: Arc::new(llm),
        mailer: Arc::new(mailer),
    };

    let cors = cors_layer(&config.frontend_origin)?;
    info!("CORS restricted to {}", config.frontend_origin);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
