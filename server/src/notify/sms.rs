//! Twilio SMS client.
//!
//! Sends the short status text through the Twilio Messages API. The API is
//! form-encoded with basic auth, unlike the JSON email provider.

use std::time::Duration;

use reqwest::Client;
use tracing::{info, warn};

use super::{SendError, SmsSender};

/// SMS sender backed by the Twilio Messages API.
#[derive(Debug, Clone)]
pub struct TwilioSms {
    http: Client,
    account_sid: String,
    auth_token: String,
    timeout: Duration,
}

impl TwilioSms {
    pub fn new(account_sid: String, auth_token: String, timeout: Duration) -> Self {
        Self {
            http: Client::new(),
            account_sid,
            auth_token,
            timeout,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.account_sid
        )
    }
}

#[async_trait::async_trait]
impl SmsSender for TwilioSms {
    async fn send(&self, from: &str, to: &str, body: &str) -> Result<(), SendError> {
        let response = self
            .http
            .post(self.endpoint())
            .timeout(self.timeout)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("From", from), ("To", to), ("Body", body)])
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
                "twilio_send_rejected"
            );
            return Err(SendError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!(to = to, "twilio_send_ok");

        Ok(())
    }
}
