//! Resend email client.
//!
//! Sends transactional email through the Resend HTTP API. One client
//! instance serves both the customer and admin channels; the from address
//! is per-send.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{info, warn};

use super::{EmailSender, SendError};

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Email sender backed by the Resend API.
#[derive(Debug, Clone)]
pub struct ResendMailer {
    http: Client,
    api_key: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

impl ResendMailer {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            http: Client::new(),
            api_key,
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl EmailSender for ResendMailer {
    async fn send(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        html: &str,
    ) -> Result<(), SendError> {
        let response = self
            .http
            .post(RESEND_ENDPOINT)
            .timeout(self.timeout)
            .bearer_auth(&self.api_key)
            .json(&SendRequest {
                from,
                to: [to],
                subject,
                html,
            })
            .send()
            .await
            .map_err(SendError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                to = to,
                status_code = status.as_u16(),
                body = %body,
                "resend_send_rejected"
            );
            return Err(SendError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!(to = to, subject = subject, "resend_send_ok");

        Ok(())
    }
}
