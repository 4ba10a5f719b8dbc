//! Referral Bot - Telegram webhook bot with a bounded TTL+LRU referral cache

mod api;
mod bot;
mod cache;
mod config;
mod error;
mod telegram;

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use telegram::BotCommand;

/// Main entry point for the referral bot.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from `.env` / environment variables
/// 3. Create application state (referral cache + Bot API client)
/// 4. Register the webhook URL and command menu with Telegram
/// 5. Start HTTP server on the configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "referral_bot=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting referral bot");

    // Load .env if present, then configuration from environment variables
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        "Configuration loaded: webhook={}, channel_sub_required={}, referral_max_age={}s, referral_max_size={}",
        config.webhook_url(),
        config.require_channel_sub,
        config.referral_max_age.as_secs(),
        config.referral_max_size
    );

    let webhook_url = config.webhook_url();
    let port = config.webhook_port;

    // Create application state with the referral cache
    let state = AppState::from_config(config);
    info!("Referral cache initialized");

    // Register webhook and command menu; failures are logged rather than
    // fatal so the server can still come up behind a manually set webhook
    if let Err(err) = state.telegram.set_webhook(&webhook_url).await {
        warn!(error = %err, "failed to register webhook");
    } else {
        info!("Webhook registered at {}", webhook_url);
    }
    let commands = [BotCommand {
        command: "/start".to_string(),
        description: "Start the bot".to_string(),
    }];
    if let Err(err) = state.telegram.set_my_commands(&commands).await {
        warn!(error = %err, "failed to set bot commands");
    } else {
        info!("Bot commands have been set");
    }

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port; TLS terminates at the fronting proxy
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
