//! AC Detailing web server — form and webhook receiver.
//!
//! This binary wires the providers together and serves the HTTP surface:
//! - Receives inquiry and booking form submissions
//! - Receives the database's row-insert webhook
//! - Persists rows through Supabase and fans out notifications

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use acdetail::notify::{EmailSender, ResendMailer, SmsSender, TwilioSms};
use acdetail::store::SupabaseStore;
use acdetail::web::{router, AppState};
use acdetail::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("web_server_starting");

    // Load and validate configuration
    let config = Config::from_env();
    config.validate().context("invalid configuration")?;
    info!(
        port = config.port,
        environment = %config.environment,
        webhook_auth_configured = config.webhook_shared_secret.is_some(),
        email_configured = config.resend_api_key.is_some(),
        sms_configured = config.twilio_from.is_some(),
        "config_loaded"
    );

    let timeout = config.request_timeout();

    // Construct the provider clients; lifecycle = process lifetime.
    let store = Arc::new(SupabaseStore::new(
        config.supabase_url.clone(),
        config.supabase_service_key.clone(),
        timeout,
    ));

    let mailer: Option<Arc<dyn EmailSender>> = match &config.resend_api_key {
        Some(key) => Some(Arc::new(ResendMailer::new(key.clone(), timeout))),
        None => {
            warn!("email_channels_disabled_no_api_key");
            None
        }
    };

    let sms: Option<Arc<dyn SmsSender>> =
        match (&config.twilio_account_sid, &config.twilio_auth_token) {
            (Some(sid), Some(token)) => {
                Some(Arc::new(TwilioSms::new(sid.clone(), token.clone(), timeout)))
            }
            _ => {
                warn!("sms_channel_disabled_no_credentials");
                None
            }
        };

    let port = config.port;
    let state = AppState::new(config, store, mailer, sms);

    // Build the router
    let app = router(state).layer(TraceLayer::new_for_http());

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
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
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
