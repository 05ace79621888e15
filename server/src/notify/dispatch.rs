//! Best-effort notification fan-out.
//!
//! Channels are independent: a failure in one is logged and absorbed, and
//! never blocks the others or the overall request. The three sends are
//! issued concurrently since none of their outcomes gate another.

use futures::future::join3;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::submit::Lead;

use super::templates;
use super::{EmailSender, SmsSender};

/// Outcome of one channel attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOutcome {
    Sent,
    Failed,
    /// Channel not attempted (provider unconfigured, or no phone for SMS).
    Skipped,
}

/// Per-channel outcomes for one submission, in stable order: customer
/// email, admin email, SMS. Used for logging and tests only; it never
/// changes the HTTP result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub customer_email: ChannelOutcome,
    pub admin_email: ChannelOutcome,
    pub sms: ChannelOutcome,
}

impl DispatchReport {
    pub fn sent(&self) -> usize {
        self.channels()
            .iter()
            .filter(|o| **o == ChannelOutcome::Sent)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.channels()
            .iter()
            .filter(|o| **o == ChannelOutcome::Failed)
            .count()
    }

    fn channels(&self) -> [ChannelOutcome; 3] {
        [self.customer_email, self.admin_email, self.sms]
    }
}

/// Fan a normalized lead out to the configured channels.
pub async fn dispatch(
    config: &Config,
    email: Option<&dyn EmailSender>,
    sms: Option<&dyn SmsSender>,
    lead: &Lead,
) -> DispatchReport {
    let customer = async {
        let Some(mailer) = email else {
            warn!(to = %lead.email, "customer_email_skipped_no_mailer");
            return ChannelOutcome::Skipped;
        };

        let subject = templates::customer_subject(lead.kind);
        let html = templates::customer_html(lead);
        match mailer
            .send(&config.email_from_bookings, &lead.email, subject, &html)
            .await
        {
            Ok(()) => {
                info!(to = %lead.email, kind = lead.kind.label(), "customer_email_sent");
                ChannelOutcome::Sent
            }
            Err(e) => {
                error!(error = %e, to = %lead.email, "customer_email_failed");
                ChannelOutcome::Failed
            }
        }
    };

    let admin = async {
        let Some(mailer) = email else {
            warn!(to = %config.admin_email, "admin_email_skipped_no_mailer");
            return ChannelOutcome::Skipped;
        };

        let subject = templates::admin_subject(lead.kind);
        let html = templates::admin_html(lead);
        match mailer
            .send(&config.email_from_alerts, &config.admin_email, subject, &html)
            .await
        {
            Ok(()) => {
                info!(to = %config.admin_email, kind = lead.kind.label(), "admin_email_sent");
                ChannelOutcome::Sent
            }
            Err(e) => {
                error!(error = %e, to = %config.admin_email, "admin_email_failed");
                ChannelOutcome::Failed
            }
        }
    };

    let text = async {
        let (Some(sender), Some(from)) = (sms, config.twilio_from.as_deref()) else {
            return ChannelOutcome::Skipped;
        };
        if !lead.has_phone() {
            info!("sms_skipped_no_phone");
            return ChannelOutcome::Skipped;
        }

        let body = templates::sms_body(lead);
        match sender.send(from, &lead.phone, &body).await {
            Ok(()) => {
                info!(to = %lead.phone, "sms_sent");
                ChannelOutcome::Sent
            }
            Err(e) => {
                error!(error = %e, to = %lead.phone, "sms_failed");
                ChannelOutcome::Failed
            }
        }
    };

    let (customer_email, admin_email, sms) = join3(customer, admin, text).await;

    DispatchReport {
        customer_email,
        admin_email,
        sms,
    }
}
