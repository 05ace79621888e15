//! Configuration module for environment variable parsing.
//!
//! Reads all configuration from environment variables once at startup.
//! Optional provider credentials gate their channel: a missing Resend key
//! disables both email channels, missing Twilio settings disable SMS.

use std::env;
use std::time::Duration;

use tracing::warn;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Deployment environment name ("production" enables strict validation)
    pub environment: String,

    /// Supabase project URL (REST base)
    pub supabase_url: String,

    /// Supabase service-role key used for row inserts
    pub supabase_service_key: String,

    /// Resend API key; email channels are disabled when unset
    pub resend_api_key: Option<String>,

    /// Destination address for admin alert emails
    pub admin_email: String,

    /// From address for customer acknowledgment emails
    pub email_from_bookings: String,

    /// From address for admin alert emails
    pub email_from_alerts: String,

    /// Twilio account SID
    pub twilio_account_sid: Option<String>,

    /// Twilio auth token
    pub twilio_auth_token: Option<String>,

    /// Outbound SMS sender number; the SMS channel is enabled when set
    pub twilio_from: Option<String>,

    /// Shared secret for webhook verification; auth is skipped when unset
    pub webhook_shared_secret: Option<String>,

    /// HTTP request timeout in milliseconds for outbound provider calls
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            environment: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),

            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| "http://localhost:54321".to_string()),

            supabase_service_key: env::var("SUPABASE_SERVICE_KEY").unwrap_or_default(),

            resend_api_key: non_empty("RESEND_API_KEY"),

            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "acdetailcleaning@gmail.com".to_string()),

            email_from_bookings: env::var("EMAIL_FROM_BOOKINGS")
                .unwrap_or_else(|_| "AC Detailing <bookings@acdetailing.app>".to_string()),

            email_from_alerts: env::var("EMAIL_FROM_ALERTS")
                .unwrap_or_else(|_| "AC Detailing <alerts@acdetailing.app>".to_string()),

            twilio_account_sid: non_empty("TWILIO_ACCOUNT_SID"),

            twilio_auth_token: non_empty("TWILIO_AUTH_TOKEN"),

            twilio_from: non_empty("TWILIO_FROM"),

            webhook_shared_secret: non_empty("WEBHOOK_SHARED_SECRET"),

            request_timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Timeout applied to every outbound provider call.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Validate the loaded configuration.
    ///
    /// Production refuses to start without the webhook shared secret, since
    /// the webhook endpoint is fail-open when the secret is unset. Everything
    /// else degrades to a disabled channel and only warns.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.webhook_shared_secret.is_none() {
            if self.is_production() {
                return Err(ConfigError::MissingWebhookSecret);
            }
            warn!("webhook_auth_not_configured");
        }

        if self.supabase_service_key.is_empty() {
            warn!("supabase_service_key_missing");
        }

        if self.resend_api_key.is_none() {
            warn!("email_channels_disabled_no_api_key");
        }

        let twilio = [
            self.twilio_account_sid.is_some(),
            self.twilio_auth_token.is_some(),
            self.twilio_from.is_some(),
        ];
        if twilio.iter().any(|set| *set) && !twilio.iter().all(|set| *set) {
            warn!(
                sid_set = twilio[0],
                token_set = twilio[1],
                from_set = twilio[2],
                "twilio_partially_configured"
            );
        }

        Ok(())
    }
}

/// Configuration validation failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_ENV=production requires WEBHOOK_SHARED_SECRET to be set")]
    MissingWebhookSecret,
}

/// Read an environment variable, treating empty/whitespace values as unset.
fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
