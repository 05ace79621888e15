//! Notification channels and the best-effort dispatcher.
//!
//! A submission fans out to up to three independent channels: a customer
//! acknowledgment email, an admin alert email, and an optional SMS. The
//! providers sit behind traits so the dispatcher and handlers can be tested
//! without network access.

pub mod dispatch;
pub mod email;
pub mod sms;
pub mod templates;

use async_trait::async_trait;

pub use dispatch::{dispatch, ChannelOutcome, DispatchReport};
pub use email::ResendMailer;
pub use sms::TwilioSms;

/// Outbound email seam.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        html: &str,
    ) -> Result<(), SendError>;
}

/// Outbound SMS seam.
#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send(&self, from: &str, to: &str, body: &str) -> Result<(), SendError>;
}

/// Channel-local send failure. Never escalated past the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("send request failed: {0}")]
    Transport(String),
    #[error("provider rejected send with status {status}")]
    Rejected { status: u16, body: String },
}

impl SendError {
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SendError::Transport(format!("send timed out: {e}"))
        } else {
            SendError::Transport(e.to_string())
        }
    }
}
