//! Shared in-memory doubles for the store and notification seams.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::Config;
use crate::notify::{EmailSender, SendError, SmsSender};
use crate::store::{RecordStore, StoreError};
use crate::submit::{Lead, RecordKind};

/// Recording store that accepts every insert.
#[derive(Default)]
pub(crate) struct MemoryStore {
    pub inserts: Mutex<Vec<(String, Value)>>,
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&self, table: &str, record: &Value) -> Result<(), StoreError> {
        self.inserts
            .lock()
            .unwrap()
            .push((table.to_string(), record.clone()));
        Ok(())
    }
}

/// Store that rejects every insert.
pub(crate) struct FailingStore;

#[async_trait]
impl RecordStore for FailingStore {
    async fn insert(&self, _table: &str, _record: &Value) -> Result<(), StoreError> {
        Err(StoreError::Transport("store offline".to_string()))
    }
}

/// One recorded email send.
pub(crate) struct SentEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Recording mailer that accepts every send.
#[derive(Default)]
pub(crate) struct MemoryMailer {
    pub sent: Mutex<Vec<SentEmail>>,
}

#[async_trait]
impl EmailSender for MemoryMailer {
    async fn send(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        html: &str,
    ) -> Result<(), SendError> {
        self.sent.lock().unwrap().push(SentEmail {
            from: from.to_string(),
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}

/// Mailer that fails sends to one address and records the rest. Lets a test
/// fail exactly one email channel while the other still delivers.
pub(crate) struct FlakyMailer {
    pub fail_to: String,
    pub sent: Mutex<Vec<SentEmail>>,
}

impl FlakyMailer {
    pub fn failing_to(address: &str) -> Self {
        Self {
            fail_to: address.to_string(),
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl EmailSender for FlakyMailer {
    async fn send(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        html: &str,
    ) -> Result<(), SendError> {
        if to == self.fail_to {
            return Err(SendError::Rejected {
                status: 500,
                body: "simulated outage".to_string(),
            });
        }
        self.sent.lock().unwrap().push(SentEmail {
            from: from.to_string(),
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}

/// Recording SMS sender; entries are (from, to, body).
#[derive(Default)]
pub(crate) struct MemorySms {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl SmsSender for MemorySms {
    async fn send(&self, from: &str, to: &str, body: &str) -> Result<(), SendError> {
        self.sent
            .lock()
            .unwrap()
            .push((from.to_string(), to.to_string(), body.to_string()));
        Ok(())
    }
}

pub(crate) fn test_config() -> Config {
    Config {
        port: 0,
        environment: "test".to_string(),
        supabase_url: "http://localhost:54321".to_string(),
        supabase_service_key: "service-key".to_string(),
        resend_api_key: Some("re_test".to_string()),
        admin_email: "owner@example.com".to_string(),
        email_from_bookings: "AC Detailing <bookings@acdetailing.app>".to_string(),
        email_from_alerts: "AC Detailing <alerts@acdetailing.app>".to_string(),
        twilio_account_sid: Some("AC0123".to_string()),
        twilio_auth_token: Some("token".to_string()),
        twilio_from: Some("+15550001111".to_string()),
        webhook_shared_secret: Some("s3cret".to_string()),
        request_timeout_ms: 1000,
    }
}

pub(crate) fn booking_lead() -> Lead {
    Lead {
        kind: RecordKind::Booking,
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "+15551234567".to_string(),
        vehicle: "Honda CR-V".to_string(),
        package: "GOLD – SUV ($290)".to_string(),
        date: "2025-09-01".to_string(),
        time: "10:00".to_string(),
        message: "—".to_string(),
    }
}
